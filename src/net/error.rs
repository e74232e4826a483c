//! Error taxonomy shared by the request helper, typed endpoints, and session manager.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Why an API call did not produce a usable response.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Login/registration rejected with a human-readable reason.
    #[error("{0}")]
    Authentication(String),

    /// The credential sent with the request was rejected (HTTP 401).
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other non-success response.
    #[error("{}", request_failed_message(.status, .message))]
    Request { status: u16, message: Option<String> },

    /// No definite verdict from the server: network failure or unreadable body.
    #[error("{0}")]
    Transient(String),

    /// The durable credential store refused a write.
    #[error("could not persist session: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }

    /// HTTP status carried by the error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message the server supplied, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Authentication(message) => Some(message),
            Self::Request { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
fn request_failed_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("Request failed with status {status}"),
    }
}

/// Failure of a single HTTP exchange below the status-code level.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request could not be built: {0}")]
    Build(String),

    #[error("network error: {0}")]
    Network(String),
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        Self::Transient(err.to_string())
    }
}
