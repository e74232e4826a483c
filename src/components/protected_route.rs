//! Route wrapper that applies the session guard.
//!
//! DESIGN
//! ======
//! The decision itself lives in `util::guard::decide_route`; this component
//! only renders it and performs the redirect or retry it asks for.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::app::SessionHandle;
use crate::state::session::{SessionManager, SessionState};
use crate::util::events::SessionEvent;
use crate::util::guard::{
    DASHBOARD_ROUTE, GuardDecision, Revalidation, RouteContext, RouteRequirement, decide_route, login_redirect_path,
    requested_path,
};

/// Renders `children` once the session allows it.
///
/// While the session settles a neutral indicator is shown and no redirect
/// happens, so a returning user is never bounced to `/login` on reload.
#[component]
pub fn ProtectedRoute(#[prop(optional)] requirement: RouteRequirement, children: ChildrenFn) -> impl IntoView {
    let state = expect_context::<RwSignal<SessionState>>();
    let session_event = expect_context::<RwSignal<Option<SessionEvent>>>();
    let session = expect_context::<SessionHandle>();
    let revalidation = RwSignal::new(Revalidation::NotStarted);
    let location = use_location();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| {
        let context = RouteContext {
            has_credential: session.with_value(SessionManager::has_credential),
            revalidation: revalidation.get(),
            session_event: session_event.get(),
        };
        let path = requested_path(&location.pathname.get(), &location.search.get());
        state.with(|s| decide_route(s, context, requirement, &path))
    });

    Effect::new(move || {
        let replace = NavigateOptions { replace: true, ..NavigateOptions::default() };
        match decision.get() {
            GuardDecision::RedirectToLogin { from } => navigate(&login_redirect_path(&from), replace),
            GuardDecision::RedirectToDashboard => navigate(DASHBOARD_ROUTE, replace),
            GuardDecision::Revalidate => {
                revalidation.set(Revalidation::InFlight);
                #[cfg(feature = "hydrate")]
                leptos::task::spawn_local(async move {
                    session.get_value().revalidate().await;
                    let _ = revalidation.try_set(Revalidation::Finished);
                });
                #[cfg(not(feature = "hydrate"))]
                revalidation.set(Revalidation::Finished);
            }
            GuardDecision::Loading | GuardDecision::Render => {}
        }
    });

    move || match decision.get() {
        GuardDecision::Render => children().into_any(),
        GuardDecision::Loading | GuardDecision::Revalidate => view! {
            <div class="route-loading" aria-busy="true">
                <p>"Loading..."</p>
            </div>
        }
        .into_any(),
        GuardDecision::RedirectToLogin { .. } | GuardDecision::RedirectToDashboard => view! {
            <div class="route-loading">
                <p>"Redirecting..."</p>
            </div>
        }
        .into_any(),
    }
}
