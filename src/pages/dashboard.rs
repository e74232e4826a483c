//! Task dashboard for the signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. Employees see the tasks assigned
//! to them and move each through its workflow; admins see every task here and
//! manage them from `/admin`. Load and update failures are logged and shown
//! inline; a 401 is handled by the request helper, which ends the session.

use leptos::prelude::*;

use crate::app::SessionHandle;
use crate::components::app_header::AppHeader;
use crate::components::task_card::TaskCard;
use crate::net::types::TaskStatus;
use crate::state::session::SessionState;
use crate::state::tasks::{TaskStats, TasksState, can_update_status, visible_tasks};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = expect_context::<RwSignal<SessionState>>();
    let session = expect_context::<SessionHandle>();
    let tasks = RwSignal::new(TasksState { loading: true, ..TasksState::default() });

    #[cfg(feature = "hydrate")]
    load_tasks(session, tasks);

    let on_status = Callback::new(move |(task_id, next): (String, TaskStatus)| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let api = session.get_value().api().clone();
            let update = crate::net::types::TaskUpdate::status(next);
            match crate::net::api::update_task(&api, &task_id, &update).await {
                Ok(task) => tasks.update(|s| s.upsert(task)),
                Err(e) => {
                    leptos::logging::warn!("updating task {task_id} failed: {e}");
                    tasks.update(|s| s.error = Some(e.to_string()));
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (session, task_id, next);
    });

    let stats = Signal::derive(move || {
        state.with(|s| match &s.user {
            Some(user) => tasks.with(|t| TaskStats::from_tasks(visible_tasks(user, &t.items))),
            None => TaskStats::default(),
        })
    });

    let cards = move || {
        let Some(user) = state.with(|s| s.user.clone()) else {
            return Vec::new();
        };
        tasks.with(|t| {
            visible_tasks(&user, &t.items)
                .into_iter()
                .map(|task| {
                    let on_status = can_update_status(&user, task).then_some(on_status);
                    let task = task.clone();
                    match on_status {
                        Some(on_status) => view! { <TaskCard task=task on_status=on_status/> }.into_any(),
                        None => view! { <TaskCard task=task/> }.into_any(),
                    }
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="dashboard-page">
            <AppHeader title="My Tasks"/>
            <TaskStatsRow stats=stats/>
            <Show when=move || tasks.with(|t| t.error.is_some())>
                <p class="dashboard-page__error">{move || tasks.with(|t| t.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show when=move || !tasks.with(|t| t.loading) fallback=move || view! { <p>"Loading tasks..."</p> }>
                <Show
                    when=move || { stats.get().total > 0 }
                    fallback=move || view! { <p class="dashboard-page__empty">"You don't have any tasks assigned yet."</p> }
                >
                    <div class="dashboard-page__cards">{cards}</div>
                </Show>
            </Show>
        </div>
    }
}

/// Per-status counters above a task list.
#[component]
pub(crate) fn TaskStatsRow(#[prop(into)] stats: Signal<TaskStats>) -> impl IntoView {
    view! {
        <div class="task-stats">
            <span class="task-stats__item">"Total " <strong>{move || stats.get().total}</strong></span>
            <span class="task-stats__item">"Pending " <strong>{move || stats.get().pending}</strong></span>
            <span class="task-stats__item">"In Progress " <strong>{move || stats.get().in_progress}</strong></span>
            <span class="task-stats__item">"Completed " <strong>{move || stats.get().completed}</strong></span>
        </div>
    }
}

/// Fetch the task list into `tasks`, recording any failure for display.
#[cfg(feature = "hydrate")]
pub(crate) fn load_tasks(session: SessionHandle, tasks: RwSignal<TasksState>) {
    tasks.update(|s| {
        s.loading = true;
        s.error = None;
    });
    leptos::task::spawn_local(async move {
        let api = session.get_value().api().clone();
        let result = crate::net::api::list_tasks(&api).await;
        tasks.update(|s| {
            s.loading = false;
            match result {
                Ok(items) => s.items = items,
                Err(e) => {
                    leptos::logging::warn!("loading tasks failed: {e}");
                    s.error = Some(e.to_string());
                }
            }
        });
    });
}
