//! Card component for a single task on the dashboards.
//!
//! DESIGN
//! ======
//! The card never decides permissions itself; callers pass the actions the
//! signed-in user may take and the card renders only those.

#[cfg(test)]
#[path = "task_card_test.rs"]
mod task_card_test;

use leptos::prelude::*;

use crate::net::types::{Task, TaskStatus};

/// A task summary with optional status picker and delete button.
#[component]
pub fn TaskCard(
    task: Task,
    #[prop(optional)] on_status: Option<Callback<(String, TaskStatus)>>,
    #[prop(optional)] on_delete: Option<Callback<String>>,
) -> impl IntoView {
    let status = task.status;
    let assignee = assignee_label(&task);
    let due = task.due_date.as_deref().map(due_date_label).map(str::to_owned);
    let description = task.description.clone().filter(|d| !d.trim().is_empty());
    let task_id = task.id.clone();

    let status_control = on_status.map(|on_status| {
        let task_id = task_id.clone();
        view! {
            <select
                class="task-card__status-select"
                aria-label="Task status"
                on:change=move |ev| {
                    if let Some(next) = TaskStatus::parse(&event_target_value(&ev)) {
                        on_status.run((task_id.clone(), next));
                    }
                }
            >
                {TaskStatus::ALL
                    .into_iter()
                    .map(|option| {
                        view! {
                            <option value=option.as_str() selected={option == status}>
                                {option.label()}
                            </option>
                        }
                    })
                    .collect::<Vec<_>>()}
            </select>
        }
    });

    let delete_control = on_delete.map(|on_delete| {
        let task_id = task_id.clone();
        view! {
            <button
                class="task-card__delete"
                on:click=move |_| on_delete.run(task_id.clone())
                title="Delete task"
                aria-label="Delete task"
            >
                "✕"
            </button>
        }
    });

    view! {
        <article class=format!("task-card task-card--{}", status_modifier(status))>
            <header class="task-card__header">
                <span class="task-card__title">{task.title}</span>
                <span class=format!("task-card__priority task-card__priority--{}", task.priority.as_str())>
                    {task.priority.as_str()}
                </span>
                {delete_control}
            </header>
            {description.map(|d| view! { <p class="task-card__description">{d}</p> })}
            <footer class="task-card__meta">
                <span class="task-card__assignee">{assignee}</span>
                {due.map(|d| view! { <span class="task-card__due">"Due " {d}</span> })}
                {match status_control {
                    Some(control) => control.into_any(),
                    None => view! { <span class="task-card__status">{status.label()}</span> }.into_any(),
                }}
            </footer>
        </article>
    }
}

/// CSS modifier for a status; the wire value contains a space.
fn status_modifier(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "pending",
        TaskStatus::InProgress => "in-progress",
        TaskStatus::Completed => "completed",
    }
}

fn assignee_label(task: &Task) -> String {
    match &task.assigned_to {
        Some(assignee) => assignee.name().unwrap_or("Assigned").to_owned(),
        None => "Unassigned".to_owned(),
    }
}

/// Date part of an ISO timestamp (`2024-05-01T00:00:00.000Z` -> `2024-05-01`).
fn due_date_label(raw: &str) -> &str {
    raw.split_once('T').map_or(raw, |(date, _)| date)
}
