use super::*;

#[test]
fn request_error_prefers_server_message() {
    let err = ApiError::Request { status: 400, message: Some("Title is required".into()) };
    assert_eq!(err.to_string(), "Title is required");
    assert_eq!(err.server_message(), Some("Title is required"));
}

#[test]
fn request_error_falls_back_to_status_message() {
    let err = ApiError::Request { status: 503, message: None };
    assert_eq!(err.to_string(), "Request failed with status 503");
    assert_eq!(err.server_message(), None);
    assert_eq!(err.status(), Some(503));
}

#[test]
fn unauthorized_reports_401() {
    assert_eq!(ApiError::Unauthorized.status(), Some(401));
    assert!(ApiError::Unauthorized.is_unauthorized());
    assert_eq!(ApiError::Unauthorized.to_string(), "Unauthorized");
}

#[test]
fn transport_errors_become_transient() {
    let err: ApiError = TransportError::Network("connection refused".into()).into();
    assert!(err.is_transient());
    assert_eq!(err.status(), None);
    assert_eq!(err.to_string(), "network error: connection refused");
}
