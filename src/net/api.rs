//! Typed REST endpoints for the TeamFlow API.
//!
//! Every function here goes through [`ApiClient`], so 401 handling and the
//! bearer header live in exactly one place. Pages never touch the credential
//! store themselves.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::request::{ApiClient, RequestOptions};
use super::types::{AuthResponse, DataEnvelope, LoginRequest, NewTask, RegisterProfile, SessionUser, Task, TaskUpdate};

pub const ME_PATH: &str = "/api/auth/me";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const TASKS_PATH: &str = "/api/tasks";
pub const USERS_PATH: &str = "/api/users";

fn task_endpoint(task_id: &str) -> String {
    format!("{TASKS_PATH}/{task_id}")
}

fn encode<T: Serialize>(body: &T) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Transient(format!("could not encode request body: {e}")))
}

/// Accept either `{ data: T }` or a bare `T`; write endpoints are not
/// consistent about the envelope.
fn unwrap_data<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    let inner = match value {
        Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or(Value::Null),
        other => other,
    };
    serde_json::from_value(inner).map_err(|e| ApiError::Transient(format!("unexpected response shape: {e}")))
}

/// Ask the authority who the stored credential belongs to (`GET /api/auth/me`).
///
/// # Errors
///
/// [`ApiError::Unauthorized`] when the credential is rejected; otherwise as
/// [`ApiClient::request`].
pub async fn fetch_me(api: &ApiClient) -> Result<SessionUser, ApiError> {
    let envelope: DataEnvelope<SessionUser> = api.request_json(ME_PATH, RequestOptions::get()).await?;
    Ok(envelope.data)
}

/// Exchange email + password for a credential (`POST /api/auth/login`).
///
/// # Errors
///
/// As [`ApiClient::request`]. The request is anonymous, so a wrong password
/// comes back as [`ApiError::Request`] rather than a session expiry.
pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
    let body = encode(&LoginRequest { email: email.to_owned(), password: password.to_owned() })?;
    api.request_json(LOGIN_PATH, RequestOptions::post(body).anonymous()).await
}

/// Create an account and receive a credential (`POST /api/auth/register`).
///
/// # Errors
///
/// As [`login`].
pub async fn register(api: &ApiClient, profile: &RegisterProfile) -> Result<AuthResponse, ApiError> {
    let body = encode(profile)?;
    api.request_json(REGISTER_PATH, RequestOptions::post(body).anonymous()).await
}

/// Tasks visible to the caller (`GET /api/tasks`). The API scopes the list
/// by role: admins get everything, employees their own assignments.
///
/// # Errors
///
/// As [`ApiClient::request`].
pub async fn list_tasks(api: &ApiClient) -> Result<Vec<Task>, ApiError> {
    let envelope: DataEnvelope<Vec<Task>> = api.request_json(TASKS_PATH, RequestOptions::get()).await?;
    Ok(envelope.data)
}

/// User directory (`GET /api/users`).
///
/// # Errors
///
/// As [`ApiClient::request`].
pub async fn list_users(api: &ApiClient) -> Result<Vec<SessionUser>, ApiError> {
    let envelope: DataEnvelope<Vec<SessionUser>> = api.request_json(USERS_PATH, RequestOptions::get()).await?;
    Ok(envelope.data)
}

/// Create a task (`POST /api/tasks`).
///
/// # Errors
///
/// As [`ApiClient::request`].
pub async fn create_task(api: &ApiClient, task: &NewTask) -> Result<Task, ApiError> {
    let body = encode(task)?;
    unwrap_data(api.request(TASKS_PATH, RequestOptions::post(body)).await?)
}

/// Apply a partial update (`PUT /api/tasks/:id`).
///
/// # Errors
///
/// As [`ApiClient::request`].
pub async fn update_task(api: &ApiClient, task_id: &str, update: &TaskUpdate) -> Result<Task, ApiError> {
    let body = encode(update)?;
    unwrap_data(api.request(&task_endpoint(task_id), RequestOptions::put(body)).await?)
}

/// Delete a task (`DELETE /api/tasks/:id`).
///
/// # Errors
///
/// As [`ApiClient::request`].
pub async fn delete_task(api: &ApiClient, task_id: &str) -> Result<(), ApiError> {
    api.request(&task_endpoint(task_id), RequestOptions::delete()).await?;
    Ok(())
}
