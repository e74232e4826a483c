//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::{NavigateOptions, StaticSegment};

use crate::components::protected_route::ProtectedRoute;
use crate::config::{ApiConfig, SessionConfig};
use crate::pages::{admin::AdminPage, dashboard::DashboardPage, login::LoginPage, register::RegisterPage};
use crate::state::session::SessionManager;
use crate::util::events::SessionEvent;
use crate::util::guard::{DASHBOARD_ROUTE, LOGIN_ROUTE, RouteRequirement, requested_path, session_event_target};

/// Context handle for the session manager.
///
/// The manager is `Rc`-based, so it lives in local storage; the handle itself
/// is `Copy` and can be captured by view closures and event handlers.
pub type SessionHandle = StoredValue<SessionManager, LocalStorage>;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session manager and a reactive mirror of its state, starts
/// session initialization once, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = SessionManager::browser(ApiConfig::from_window(), SessionConfig::default());

    let state = RwSignal::new(session.state());
    session.subscribe(move |next| {
        let _ = state.try_set(next.clone());
    });

    let last_event = RwSignal::new(None::<SessionEvent>);
    session.events().subscribe(move |event| {
        let _ = last_event.try_set(Some(event));
    });

    provide_context(state);
    provide_context(last_event);
    provide_context::<SessionHandle>(StoredValue::new_local(session.clone()));

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        session.initialize().await;
    });
    #[cfg(not(feature = "hydrate"))]
    drop(session);

    view! {
        <Stylesheet id="leptos" href="/pkg/teamflow.css"/>
        <Title text="TeamFlow"/>

        <Router>
            <SessionRedirects/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route
                    path=StaticSegment("dashboard")
                    view=|| view! { <ProtectedRoute><DashboardPage/></ProtectedRoute> }
                />
                <Route
                    path=StaticSegment("admin")
                    view=|| {
                        view! {
                            <ProtectedRoute requirement=RouteRequirement::Admin>
                                <AdminPage/>
                            </ProtectedRoute>
                        }
                    }
                />
                <Route path=StaticSegment("") view=|| view! { <Redirect path=DASHBOARD_ROUTE/> }/>
            </Routes>
        </Router>
    }
}

/// Sends the browser to sign-in when the session expires or the user logs out.
///
/// The event stays set until the browser is on `/login`; protected routes
/// hold off their own sign-in redirect while it is set, so each event causes
/// exactly one navigation.
#[component]
fn SessionRedirects() -> impl IntoView {
    let last_event = expect_context::<RwSignal<Option<SessionEvent>>>();
    let location = use_location();
    let navigate = use_navigate();

    Effect::new(move || {
        let Some(event) = last_event.get() else {
            return;
        };
        if location.pathname.get() == LOGIN_ROUTE {
            last_event.set(None);
            return;
        }
        let current = requested_path(&location.pathname.get_untracked(), &location.search.get_untracked());
        let target = session_event_target(event, &current);
        leptos::logging::log!("session event {event:?}; returning to sign-in");
        navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
    });
}
