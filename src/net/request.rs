//! Authenticated request helper: the single outbound path to the API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every call that needs the bearer credential goes through [`ApiClient`],
//! including the session manager's own validation call. This is the one place
//! that notices "the authority no longer accepts my credential" and acts on
//! it: the credential is cleared, `SessionEvent::Expired` is published, and
//! the caller gets `ApiError::Unauthorized`.
//!
//! ERROR HANDLING
//! ==============
//! - 401 on a request that went out with the current credential → session reset.
//! - 401 answering a credential that has since been replaced → `Unauthorized`
//!   for the caller, but the newer credential is left alone.
//! - other non-2xx → `Request { status, message }`.
//! - no response / unreadable body → `Transient`.
//!
//! No retries: one attempt, surfaced immediately.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::transport::{BrowserTransport, HttpRequest, HttpResponse, Method, Transport};
use crate::config::ApiConfig;
use crate::util::events::{SessionEvent, SessionEvents};
use crate::util::storage::{CredentialStore, LocalStorage};

const AUTHORIZATION: &str = "Authorization";
const CONTENT_TYPE: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Per-call options: method, JSON body, extra headers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    /// Send without the bearer credential (login/register).
    pub anonymous: bool,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self { method: Method::Post, body: Some(body), ..Self::default() }
    }

    pub fn put(body: Value) -> Self {
        Self { method: Method::Put, body: Some(body), ..Self::default() }
    }

    pub fn delete() -> Self {
        Self { method: Method::Delete, ..Self::default() }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }
}

/// Shared handle to the API: config, durable store, transport, and the
/// session event hub. Clones share all four.
#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    store: Rc<dyn CredentialStore>,
    transport: Rc<dyn Transport>,
    events: SessionEvents,
}

impl ApiClient {
    pub fn new(
        config: ApiConfig,
        store: Rc<dyn CredentialStore>,
        transport: Rc<dyn Transport>,
        events: SessionEvents,
    ) -> Self {
        Self { config, store, transport, events }
    }

    /// Client wired to `localStorage` and fetch.
    pub fn browser(config: ApiConfig) -> Self {
        Self::new(config, Rc::new(LocalStorage), Rc::new(BrowserTransport), SessionEvents::new())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    pub(crate) fn store(&self) -> &dyn CredentialStore {
        self.store.as_ref()
    }

    /// Send one request to `path` and return the parsed JSON body.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] on HTTP 401.
    /// - [`ApiError::Request`] on any other non-2xx status.
    /// - [`ApiError::Transient`] when no response arrived or the body is not JSON.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let anonymous = options.anonymous;
        let credential = if anonymous { None } else { self.store.token() };
        let request = self.build_request(path, options, credential.as_deref())?;
        let method = request.method;

        let response = self.transport.send(request).await.map_err(|e| {
            leptos::logging::warn!("{} {path} failed: {e}", method.as_str());
            ApiError::from(e)
        })?;

        // Anonymous calls (login/register) answer bad passwords with 401;
        // that is a form error, not a session expiry.
        if response.status == 401 && !anonymous {
            self.handle_rejection(credential.as_deref());
            return Err(ApiError::Unauthorized);
        }
        if !response.is_success() {
            return Err(ApiError::Request { status: response.status, message: server_message(&response) });
        }
        parse_body(&response)
    }

    /// [`Self::request`], deserializing the body into `T`.
    ///
    /// # Errors
    ///
    /// As [`Self::request`]; a body that does not match `T` is
    /// [`ApiError::Transient`].
    pub async fn request_json<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T, ApiError> {
        let value = self.request(path, options).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Transient(format!("unexpected response from {path}: {e}")))
    }

    fn build_request(
        &self,
        path: &str,
        options: RequestOptions,
        credential: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        let headers = merge_headers(options.headers, credential);
        let body = options
            .body
            .map(|body| serde_json::to_string(&body))
            .transpose()
            .map_err(|e| ApiError::Transient(format!("could not encode request body: {e}")))?;
        Ok(HttpRequest { method: options.method, url: self.config.url(path), headers, body })
    }

    fn handle_rejection(&self, sent: Option<&str>) {
        let current = self.store.token();
        if current.as_deref() != sent {
            leptos::logging::log!("ignoring rejection of a superseded credential");
            return;
        }
        leptos::logging::warn!("credential rejected by the API; clearing session");
        self.store.clear_session();
        self.events.emit(SessionEvent::Expired);
    }
}

/// Default JSON content type, caller headers, then the computed bearer header.
///
/// Callers may replace `Content-Type` but can never set `Authorization`.
fn merge_headers(extra: Vec<(String, String)>, credential: Option<&str>) -> Vec<(String, String)> {
    let mut headers = vec![(CONTENT_TYPE.to_owned(), JSON_CONTENT_TYPE.to_owned())];
    for (name, value) in extra {
        if name.eq_ignore_ascii_case(AUTHORIZATION) {
            continue;
        }
        headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        headers.push((name, value));
    }
    if let Some(token) = credential {
        headers.push((AUTHORIZATION.to_owned(), bearer(token)));
    }
    headers
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn server_message(response: &HttpResponse) -> Option<String> {
    let body: Value = serde_json::from_str(&response.body).ok()?;
    body.get("message")?
        .as_str()
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
}

fn parse_body(response: &HttpResponse) -> Result<Value, ApiError> {
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Transient(format!("invalid response body: {e}")))
}
