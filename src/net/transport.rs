//! One HTTP exchange, abstracted so the session core runs without a browser.
//!
//! Client-side (hydrate): `BrowserTransport` sends through `gloo-net` (fetch).
//! Tests: scripted implementations of [`Transport`].
//!
//! Status codes are data here, not errors. Interpreting them (401 handling,
//! error messages) is the request helper's job.

use super::error::TransportError;

/// HTTP method subset used by the API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Fully resolved outgoing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response: status plus body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a single request. Implementations must not retry.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    /// Perform the exchange.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no HTTP response was received.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Fetch-backed transport for the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[async_trait::async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::{Method as GlooMethod, RequestBuilder};

            let method = match request.method {
                Method::Get => GlooMethod::GET,
                Method::Post => GlooMethod::POST,
                Method::Put => GlooMethod::PUT,
                Method::Delete => GlooMethod::DELETE,
            };
            let mut builder = RequestBuilder::new(&request.url).method(method);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let built = match request.body {
                Some(body) => builder.body(body),
                None => builder.build(),
            }
            .map_err(|e| TransportError::Build(e.to_string()))?;

            let resp = built.send().await.map_err(|e| TransportError::Network(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| TransportError::Network(e.to_string()))?;
            Ok(HttpResponse { status, body })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(TransportError::Network("not available on server".to_owned()))
        }
    }
}
