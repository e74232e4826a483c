//! Account registration page.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::SessionHandle;
use crate::net::types::RegisterProfile;
use crate::state::session::SessionState;
use crate::util::guard::{DASHBOARD_ROUTE, LOGIN_ROUTE};

const MIN_PASSWORD_LEN: usize = 6;

/// Build a profile from raw form input. The server assigns the role.
fn validate_register_input(name: &str, email: &str, password: &str) -> Result<RegisterProfile, &'static str> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err("Fill in your name, email, and password.");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters.");
    }
    Ok(RegisterProfile { name: name.to_owned(), email: email.to_owned(), password: password.to_owned(), role: None })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let state = expect_context::<RwSignal<SessionState>>();
    let session = expect_context::<SessionHandle>();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    Effect::new(move || {
        if state.with(|s| !s.loading && s.is_authenticated()) {
            navigate(DASHBOARD_ROUTE, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let profile = match validate_register_input(&name.get(), &email.get(), &password.get()) {
            Ok(profile) => profile,
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
            if let Err(e) = manager.register(&profile).await {
                error.set(Some(e.to_string()));
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (session, profile);
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"TeamFlow"</h1>
                <p class="login-card__subtitle">"Create your account"</p>
                <form class="login-form" on:submit=on_submit>
                    <Show when=move || error.get().is_some()>
                        <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <label class="login-label">
                        "Full Name"
                        <input
                            class="login-input"
                            type="text"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="login-label">
                        "Email Address"
                        <input
                            class="login-input"
                            type="email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="login-label">
                        "Password"
                        <input
                            class="login-input"
                            type="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Create Account" }}
                    </button>
                </form>
                <p class="login-card__footer">
                    "Already have an account? "
                    <a href=LOGIN_ROUTE>"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
