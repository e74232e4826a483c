//! Route guard decisions and sign-in redirect helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes apply identical gating: wait while the session settles,
//! send anonymous visitors to `/login` (remembering where they were going),
//! and bounce non-admins off admin-only views. The decision is a pure
//! function so the `ProtectedRoute` component stays a thin renderer.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::state::session::SessionState;
use crate::util::events::SessionEvent;

pub const LOGIN_ROUTE: &str = "/login";
pub const REGISTER_ROUTE: &str = "/register";
pub const DASHBOARD_ROUTE: &str = "/dashboard";
pub const ADMIN_ROUTE: &str = "/admin";

/// What a route demands of the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RouteRequirement {
    #[default]
    Authenticated,
    Admin,
}

/// What a protected route should do right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still settling: neutral loading indicator, no redirect.
    Loading,
    /// Nobody signed in: go to sign-in, then come back to `from`.
    RedirectToLogin { from: String },
    /// Signed in without the required role.
    RedirectToDashboard,
    /// A credential survived a failed validation: check it again before
    /// giving up on the session.
    Revalidate,
    Render,
}

/// Progress of a protected route's one retry of a kept credential.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Revalidation {
    #[default]
    NotStarted,
    InFlight,
    Finished,
}

/// Session facts beyond [`SessionState`] that a mounted route reacts to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteContext {
    /// A credential is still stored.
    pub has_credential: bool,
    pub revalidation: Revalidation,
    /// Set while an expiry or logout is being turned into a navigation.
    pub session_event: Option<SessionEvent>,
}

/// Decide how to handle a visit to `requested_path`.
pub fn decide(state: &SessionState, requirement: RouteRequirement, requested_path: &str) -> GuardDecision {
    if state.loading {
        return GuardDecision::Loading;
    }
    let Some(user) = &state.user else {
        return GuardDecision::RedirectToLogin { from: requested_path.to_owned() };
    };
    match requirement {
        RouteRequirement::Admin if !user.role.is_admin() => GuardDecision::RedirectToDashboard,
        _ => GuardDecision::Render,
    }
}

/// [`decide`], refined for a mounted route.
///
/// Session events own the sign-in navigation they cause, so the route only
/// waits for them. A stored credential whose validation failed transiently
/// gets one revalidation before the visitor is sent to sign in.
pub fn decide_route(
    state: &SessionState,
    context: RouteContext,
    requirement: RouteRequirement,
    requested_path: &str,
) -> GuardDecision {
    match decide(state, requirement, requested_path) {
        GuardDecision::RedirectToLogin { .. } if context.session_event.is_some() => GuardDecision::Loading,
        GuardDecision::RedirectToLogin { .. } if context.has_credential => match context.revalidation {
            Revalidation::NotStarted => GuardDecision::Revalidate,
            Revalidation::InFlight => GuardDecision::Loading,
            Revalidation::Finished => GuardDecision::RedirectToLogin { from: requested_path.to_owned() },
        },
        decision => decision,
    }
}

/// Where a session event sends the browser.
///
/// An expiry remembers the page the user was on; a logout does not, so the
/// next person to sign in starts from the dashboard.
pub fn session_event_target(event: SessionEvent, current_path: &str) -> String {
    match event {
        SessionEvent::Expired => login_redirect_path(current_path),
        SessionEvent::LoggedOut => LOGIN_ROUTE.to_owned(),
    }
}

/// Path plus query string, as remembered for the post-sign-in return.
pub fn requested_path(pathname: &str, search: &str) -> String {
    let query = search.trim_start_matches('?');
    if query.is_empty() {
        pathname.to_owned()
    } else {
        format!("{pathname}?{query}")
    }
}

/// `/login` URL that remembers `from`.
pub fn login_redirect_path(from: &str) -> String {
    if from.is_empty() || from == "/" || from == LOGIN_ROUTE || from.starts_with("/login?") {
        return LOGIN_ROUTE.to_owned();
    }
    format!("{LOGIN_ROUTE}?from={}", escape_query_value(from))
}

/// Where to go after signing in.
///
/// Only same-origin absolute paths are honoured; anything else (including a
/// protocol-relative `//host`) falls back to the dashboard.
pub fn post_login_target(from: Option<&str>) -> String {
    match from.map(str::trim) {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && path != LOGIN_ROUTE
                && path != REGISTER_ROUTE
                && path != "/" =>
        {
            path.to_owned()
        }
        _ => DASHBOARD_ROUTE.to_owned(),
    }
}

/// Percent-encode the characters that would break a query value.
fn escape_query_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '%' => out.push_str("%25"),
            '&' => out.push_str("%26"),
            '+' => out.push_str("%2B"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '=' => out.push_str("%3D"),
            ' ' => out.push_str("%20"),
            other => out.push(other),
        }
    }
    out
}
