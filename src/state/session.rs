//! Session manager: the client's authentication state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionManager` exists per app run. The app shell creates it, provides
//! it through Leptos context, and runs [`SessionManager::initialize`] once on
//! hydrate. Route guards and pages read [`SessionState`]; login/register/
//! logout forms call the operations here.
//!
//! STATE
//! =====
//! `loading` starts `true` and flips to `false` exactly once, when
//! initialization settles. `user` is only ever `Some` while a credential is
//! stored. Durable writes always happen before the in-memory user is set.
//!
//! OVERLAP
//! =======
//! Initialization suspends on the validation call, so a login can complete
//! while it is in flight. Every user-visible session change (login, register,
//! logout, expiry) bumps an epoch; a validation result that started under an
//! older epoch only settles `loading` and never overwrites the newer user.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::config::{ApiConfig, SessionConfig};
use crate::net::api;
use crate::net::error::ApiError;
use crate::net::request::ApiClient;
use crate::net::types::{AuthResponse, RegisterProfile, SessionUser};
use crate::util::events::{SessionEvent, SessionEvents};
use crate::util::storage::{CredentialStore, USER_KEY};

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";

/// Snapshot of the session exposed to the rest of the app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<SessionUser>,
    pub loading: bool,
}

impl SessionState {
    /// State at process start: nothing known yet.
    pub fn initial() -> Self {
        Self { user: None, loading: true }
    }

    /// Settled and signed out.
    pub fn signed_out() -> Self {
        Self { user: None, loading: false }
    }

    /// Settled and signed in as `user`.
    pub fn signed_in(user: SessionUser) -> Self {
        Self { user: Some(user), loading: false }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial()
    }
}

type StateListener = Rc<dyn Fn(&SessionState)>;

struct Inner {
    api: ApiClient,
    config: SessionConfig,
    state: RefCell<SessionState>,
    epoch: Cell<u64>,
    initialized: Cell<bool>,
    listeners: RefCell<Vec<StateListener>>,
}

/// Cheaply cloneable handle; clones share one session.
#[derive(Clone)]
pub struct SessionManager {
    inner: Rc<Inner>,
}

impl SessionManager {
    pub fn new(api: ApiClient, config: SessionConfig) -> Self {
        let inner = Rc::new(Inner {
            api,
            config,
            state: RefCell::new(SessionState::initial()),
            epoch: Cell::new(0),
            initialized: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
        });

        // The request helper has already cleared the store when it publishes
        // `Expired`; mirror that in memory. Weak so the hub does not keep the
        // session alive.
        let weak: Weak<Inner> = Rc::downgrade(&inner);
        inner.api.events().subscribe(move |event| {
            if event == SessionEvent::Expired {
                if let Some(inner) = weak.upgrade() {
                    Self { inner }.expire();
                }
            }
        });

        Self { inner }
    }

    /// Manager wired to `localStorage` and fetch.
    pub fn browser(api_config: ApiConfig, config: SessionConfig) -> Self {
        Self::new(ApiClient::browser(api_config), config)
    }

    /// Authenticated request helper for data-fetching callers.
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    pub fn events(&self) -> &SessionEvents {
        self.inner.api.events()
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.inner.state.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    /// Whether a credential is stored, validated or not.
    pub fn has_credential(&self) -> bool {
        self.store().token().is_some()
    }

    /// Call `listener` after every state change.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&SessionState) + 'static,
    {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Settle the startup state from the stored credential. Runs once; later
    /// calls return the current state without touching the network.
    ///
    /// A transient validation failure keeps the credential (and, with
    /// identity caching, restores the cached user). Only an explicit 401
    /// clears it.
    pub async fn initialize(&self) -> SessionState {
        if self.inner.initialized.replace(true) {
            return self.state();
        }
        if !self.has_credential() {
            self.update(|state| {
                state.user = None;
                state.loading = false;
            });
            return self.state();
        }

        let epoch = self.inner.epoch.get();
        let outcome = api::fetch_me(&self.inner.api).await;
        self.settle_validation(epoch, outcome, true);
        self.state()
    }

    /// Re-check the stored credential with the authority, e.g. after
    /// initialization hit a transient failure. Leaves `loading` alone.
    pub async fn revalidate(&self) -> SessionState {
        if !self.has_credential() {
            self.update(|state| state.user = None);
            return self.state();
        }
        let epoch = self.inner.epoch.get();
        let outcome = api::fetch_me(&self.inner.api).await;
        self.settle_validation(epoch, outcome, false);
        self.state()
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Authentication`] with the server's message, or
    ///   `"Login failed"` when it gave none. Session state is unchanged.
    /// - [`ApiError::Storage`] when the credential cannot be persisted.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, ApiError> {
        let outcome = api::login(&self.inner.api, email, password).await;
        self.establish(outcome, LOGIN_FAILED)
    }

    /// Create an account and sign in as it.
    ///
    /// # Errors
    ///
    /// As [`Self::login`], with `"Registration failed"` as the fallback message.
    pub async fn register(&self, profile: &RegisterProfile) -> Result<SessionUser, ApiError> {
        let outcome = api::register(&self.inner.api, profile).await;
        self.establish(outcome, REGISTRATION_FAILED)
    }

    /// Forget the session and ask the shell to show the sign-in page.
    pub fn logout(&self) {
        self.store().clear_session();
        self.bump_epoch();
        self.update(|state| state.user = None);
        leptos::logging::log!("signed out");
        self.events().emit(SessionEvent::LoggedOut);
    }

    fn store(&self) -> &dyn CredentialStore {
        self.inner.api.store()
    }

    fn bump_epoch(&self) {
        self.inner.epoch.set(self.inner.epoch.get() + 1);
    }

    fn expire(&self) {
        self.bump_epoch();
        self.update(|state| state.user = None);
    }

    fn establish(&self, outcome: Result<AuthResponse, ApiError>, fallback: &str) -> Result<SessionUser, ApiError> {
        let AuthResponse { token, user } = outcome.map_err(|e| authentication_error(e, fallback))?;

        self.store().save_token(&token).map_err(|e| {
            leptos::logging::warn!("could not persist credential: {e}");
            ApiError::Storage(e.to_string())
        })?;
        if self.inner.config.cache_identity {
            if let Err(e) = self.store().save_cached_user(&user) {
                leptos::logging::warn!("could not cache identity: {e}");
            }
        } else {
            self.store().remove(USER_KEY);
        }

        self.bump_epoch();
        self.update(|state| state.user = Some(user.clone()));
        Ok(user)
    }

    fn settle_validation(&self, epoch: u64, outcome: Result<SessionUser, ApiError>, restore_cache: bool) {
        let current = self.inner.epoch.get() == epoch;
        match outcome {
            Ok(user) => {
                if current && self.inner.config.cache_identity {
                    if let Err(e) = self.store().save_cached_user(&user) {
                        leptos::logging::warn!("could not cache identity: {e}");
                    }
                }
                self.update(|state| {
                    if current {
                        state.user = Some(user);
                    }
                    state.loading = false;
                });
            }
            Err(ApiError::Unauthorized) => {
                self.update(|state| {
                    if current {
                        state.user = None;
                    }
                    state.loading = false;
                });
            }
            Err(e) => {
                leptos::logging::warn!("session validation failed, keeping credential: {e}");
                let cached = if current && restore_cache && self.inner.config.cache_identity {
                    self.store().cached_user()
                } else {
                    None
                };
                self.update(|state| {
                    if cached.is_some() {
                        state.user = cached;
                    }
                    state.loading = false;
                });
            }
        }
    }

    /// Apply `mutate` and notify listeners if anything changed. No borrow is
    /// held while listeners run.
    fn update(&self, mutate: impl FnOnce(&mut SessionState)) {
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            let before = state.clone();
            mutate(&mut state);
            if *state == before {
                return;
            }
            state.clone()
        };
        let listeners = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

/// Collapse a login/register failure into the form-facing error.
fn authentication_error(err: ApiError, fallback: &str) -> ApiError {
    match err {
        ApiError::Authentication(message) => ApiError::Authentication(message),
        ApiError::Request { message: Some(message), .. } => ApiError::Authentication(message),
        other => {
            leptos::logging::warn!("{fallback}: {other}");
            ApiError::Authentication(fallback.to_owned())
        }
    }
}
