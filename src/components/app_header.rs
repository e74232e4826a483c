//! Top bar shared by the signed-in views.

use leptos::prelude::*;

use crate::app::SessionHandle;
use crate::state::session::{SessionManager, SessionState};
use crate::state::tasks::can_manage_tasks;
use crate::util::guard::{ADMIN_ROUTE, DASHBOARD_ROUTE};

/// Shows who is signed in, role-appropriate links, and a logout button.
///
/// Logging out emits a session event; the app shell handles the redirect.
#[component]
pub fn AppHeader(title: &'static str) -> impl IntoView {
    let state = expect_context::<RwSignal<SessionState>>();
    let session = expect_context::<SessionHandle>();

    let identity = move || {
        state.with(|s| {
            s.user
                .as_ref()
                .map(|user| format!("{} ({})", user.name, user.role.as_str()))
                .unwrap_or_default()
        })
    };

    view! {
        <header class="app-header toolbar">
            <span class="app-header__brand">"TeamFlow"</span>
            <span class="toolbar__divider" aria-hidden="true"></span>
            <span class="app-header__title">{title}</span>
            <nav class="app-header__nav">
                <a href=DASHBOARD_ROUTE>"My Tasks"</a>
                <Show when=move || state.with(|s| s.user.as_ref().is_some_and(can_manage_tasks))>
                    <a href=ADMIN_ROUTE>"Admin"</a>
                </Show>
            </nav>
            <span class="toolbar__spacer"></span>
            <span class="app-header__self">{identity}</span>
            <button
                class="btn app-header__logout"
                on:click=move |_| session.with_value(SessionManager::logout)
                title="Logout"
            >
                "Logout"
            </button>
        </header>
    }
}
