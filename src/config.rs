//! Client configuration: remote API base URL and session persistence policy.
//!
//! DESIGN
//! ======
//! A WASM bundle has no process environment at runtime, so the only knobs
//! are the page hostname (read once at startup) and a build-time override.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// API used when the client is served from a local development host.
pub const LOCAL_API_URL: &str = "http://localhost:5000";

/// API used by every deployed build.
pub const DEFAULT_API_URL: &str = "https://teamflow-1yai.onrender.com";

/// Build-time override for the API base URL (`TEAMFLOW_API_URL=... cargo leptos build`).
const API_URL_OVERRIDE: Option<&str> = option_env!("TEAMFLOW_API_URL");

/// Where the remote authority lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Config pointing at an explicit base URL. Trailing slashes are dropped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }

    /// Pick the API for a page served from `hostname`.
    ///
    /// The build-time override wins; otherwise local hosts talk to the local
    /// API and everything else to the deployed one.
    pub fn for_hostname(hostname: &str) -> Self {
        if let Some(url) = API_URL_OVERRIDE.filter(|url| !url.trim().is_empty()) {
            return Self::new(url);
        }
        Self::new(base_url_for_hostname(hostname))
    }

    /// Config for the page currently loaded in the browser.
    pub fn from_window() -> Self {
        #[cfg(feature = "hydrate")]
        {
            let hostname = web_sys::window()
                .and_then(|w| w.location().hostname().ok())
                .unwrap_or_default();
            Self::for_hostname(&hostname)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::for_hostname("")
        }
    }

    /// Absolute URL for an API path such as `/api/tasks`.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn base_url_for_hostname(hostname: &str) -> &'static str {
    match hostname {
        "localhost" | "127.0.0.1" => LOCAL_API_URL,
        _ => DEFAULT_API_URL,
    }
}

/// Session persistence policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Also persist the signed-in identity under the `user` key and restore
    /// it when the startup validation call fails transiently.
    ///
    /// Off by default: identity (and therefore role) is always re-derived
    /// from the authority.
    pub cache_identity: bool,
}
