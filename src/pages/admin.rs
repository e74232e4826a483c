//! Admin task management: every task, the employee roster, create and delete.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;

use crate::app::SessionHandle;
use crate::components::app_header::AppHeader;
use crate::components::task_card::TaskCard;
use crate::net::types::{NewTask, Priority, SessionUser};
use crate::pages::dashboard::TaskStatsRow;
use crate::state::tasks::{TaskStats, TasksState};

/// Raw create-task form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct TaskDraft {
    title: String,
    description: String,
    priority: String,
    assignee: String,
    due_date: String,
}

impl TaskDraft {
    fn validate(&self) -> Result<NewTask, &'static str> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Give the task a title.");
        }
        let assignee = self.assignee.trim();
        if assignee.is_empty() {
            return Err("Choose an employee to assign.");
        }
        let due_date = self.due_date.trim();
        Ok(NewTask {
            title: title.to_owned(),
            description: self.description.trim().to_owned(),
            priority: Priority::parse(&self.priority).unwrap_or_default(),
            assigned_to: assignee.to_owned(),
            due_date: (!due_date.is_empty()).then(|| due_date.to_owned()),
        })
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let session = expect_context::<SessionHandle>();
    let tasks = RwSignal::new(TasksState { loading: true, ..TasksState::default() });
    let roster = RwSignal::new(Vec::<SessionUser>::new());
    let draft = RwSignal::new(TaskDraft::default());
    let form_error = RwSignal::new(None::<String>);
    let show_form = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        super::dashboard::load_tasks(session, tasks);
        leptos::task::spawn_local(async move {
            let api = session.get_value().api().clone();
            match crate::net::api::list_users(&api).await {
                Ok(users) => roster.set(crate::state::tasks::employees(&users)),
                Err(e) => leptos::logging::warn!("loading employees failed: {e}"),
            }
        });
    }

    let on_delete = Callback::new(move |task_id: String| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let api = session.get_value().api().clone();
            match crate::net::api::delete_task(&api, &task_id).await {
                Ok(()) => tasks.update(|s| s.remove(&task_id)),
                Err(e) => {
                    leptos::logging::warn!("deleting task {task_id} failed: {e}");
                    tasks.update(|s| s.error = Some(e.to_string()));
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (session, task_id);
    });

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let new_task = match draft.with(TaskDraft::validate) {
            Ok(new_task) => new_task,
            Err(message) => {
                form_error.set(Some(message.to_owned()));
                return;
            }
        };
        form_error.set(None);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let api = session.get_value().api().clone();
            match crate::net::api::create_task(&api, &new_task).await {
                Ok(task) => {
                    tasks.update(|s| s.upsert(task));
                    draft.set(TaskDraft::default());
                    show_form.set(false);
                }
                Err(e) => {
                    leptos::logging::warn!("creating task failed: {e}");
                    form_error.set(Some(e.to_string()));
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = new_task;
    };

    let stats = Signal::derive(move || tasks.with(|t| TaskStats::from_tasks(&t.items)));

    let cards = move || {
        tasks.with(|t| {
            t.items
                .iter()
                .cloned()
                .map(|task| view! { <TaskCard task=task on_delete=on_delete/> })
                .collect::<Vec<_>>()
        })
    };

    let employee_options = move || {
        roster
            .get()
            .into_iter()
            .map(|user| view! { <option value=user.id>{user.name}</option> })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="dashboard-page dashboard-page--admin">
            <AppHeader title="Admin"/>
            <div class="dashboard-page__toolbar">
                <TaskStatsRow stats=stats/>
                <span class="toolbar__spacer"></span>
                <span class="dashboard-page__roster">{move || format!("{} employees", roster.with(Vec::len))}</span>
                <button class="btn" on:click=move |_| show_form.update(|open| *open = !*open)>
                    {move || if show_form.get() { "Cancel" } else { "+ New Task" }}
                </button>
            </div>
            <Show when=move || show_form.get()>
                <form class="task-form" on:submit=on_create>
                    <Show when=move || form_error.get().is_some()>
                        <p class="task-form__error">{move || form_error.get().unwrap_or_default()}</p>
                    </Show>
                    <input
                        class="task-form__input"
                        type="text"
                        placeholder="Title"
                        prop:value=move || draft.with(|d| d.title.clone())
                        on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                    />
                    <textarea
                        class="task-form__input"
                        placeholder="Description"
                        prop:value=move || draft.with(|d| d.description.clone())
                        on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                    ></textarea>
                    <select
                        class="task-form__input"
                        aria-label="Priority"
                        on:change=move |ev| draft.update(|d| d.priority = event_target_value(&ev))
                    >
                        {Priority::ALL
                            .into_iter()
                            .map(|p| view! { <option value=p.as_str() selected={p == Priority::default()}>{p.as_str()}</option> })
                            .collect::<Vec<_>>()}
                    </select>
                    <select
                        class="task-form__input"
                        aria-label="Assignee"
                        prop:value=move || draft.with(|d| d.assignee.clone())
                        on:change=move |ev| draft.update(|d| d.assignee = event_target_value(&ev))
                    >
                        <option value="">"Assign to..."</option>
                        {employee_options}
                    </select>
                    <input
                        class="task-form__input"
                        type="date"
                        prop:value=move || draft.with(|d| d.due_date.clone())
                        on:input=move |ev| draft.update(|d| d.due_date = event_target_value(&ev))
                    />
                    <button class="btn task-form__submit" type="submit">"Create Task"</button>
                </form>
            </Show>
            <Show when=move || tasks.with(|t| t.error.is_some())>
                <p class="dashboard-page__error">{move || tasks.with(|t| t.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show when=move || !tasks.with(|t| t.loading) fallback=move || view! { <p>"Loading tasks..."</p> }>
                <Show
                    when=move || { stats.get().total > 0 }
                    fallback=move || view! { <p class="dashboard-page__empty">"No tasks have been created yet."</p> }
                >
                    <div class="dashboard-page__cards">{cards}</div>
                </Show>
            </Show>
        </div>
    }
}
