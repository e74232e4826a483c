//! Email + password sign-in page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes send anonymous visitors here with `?from=<path>`. After a
//! successful sign-in (or when a session already exists) the page forwards to
//! that path, sanitized by `util::guard::post_login_target`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::app::SessionHandle;
use crate::state::session::SessionState;
use crate::util::guard::{REGISTER_ROUTE, post_login_target};

/// Trim the email and require both fields.
fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let state = expect_context::<RwSignal<SessionState>>();
    let session = expect_context::<SessionHandle>();
    let query = use_query_map();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    // Signed in, either already or by the form below: leave for the target.
    Effect::new(move || {
        let signed_in = state.with(|s| !s.loading && s.is_authenticated());
        if signed_in {
            let target = query.with_untracked(|params| post_login_target(params.get("from").as_deref()));
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        busy.set(true);
        error.set(None);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let manager = session.get_value();
            if let Err(e) = manager.login(&email_value, &password_value).await {
                error.set(Some(e.to_string()));
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (session, email_value, password_value);
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"TeamFlow"</h1>
                <p class="login-card__subtitle">"Sign in to your account"</p>
                <form class="login-form" on:submit=on_submit>
                    <Show when=move || error.get().is_some()>
                        <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <label class="login-label">
                        "Email Address"
                        <input
                            class="login-input"
                            type="email"
                            placeholder="Enter your email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="login-label">
                        "Password"
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Enter your password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <p class="login-card__footer">
                    "Don't have an account? "
                    <a href=REGISTER_ROUTE>"Create one"</a>
                </p>
            </div>
        </div>
    }
}
