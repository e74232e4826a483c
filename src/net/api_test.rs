use super::*;
use crate::net::test_support::{BASE_URL, MockTransport, ana, auth_response, ben, client, me_response, user_json};
use crate::net::transport::Method;
use crate::net::types::{Role, TaskStatus};
use crate::util::storage::MemoryStore;
use futures::executor::block_on;
use serde_json::json;
use std::rc::Rc;

#[test]
fn task_endpoint_formats_expected_path() {
    assert_eq!(task_endpoint("t42"), "/api/tasks/t42");
}

#[test]
fn unwrap_data_accepts_envelope_and_bare_values() {
    let wrapped: String = unwrap_data(json!({ "data": "x" })).unwrap();
    let bare: String = unwrap_data(json!("x")).unwrap();
    assert_eq!(wrapped, bare);
}

#[test]
fn fetch_me_unwraps_data() {
    let store = Rc::new(MemoryStore::with_token("tok"));
    let transport = MockTransport::new();
    transport.respond(200, me_response(&ana()));
    let api = client(&store, &transport);

    let user = block_on(fetch_me(&api)).unwrap();

    assert_eq!(user, ana());
    assert_eq!(transport.last_request().unwrap().url, format!("{BASE_URL}/api/auth/me"));
}

#[test]
fn login_posts_credentials_anonymously() {
    let store = Rc::new(MemoryStore::new());
    let transport = MockTransport::new();
    transport.respond(200, auth_response("tok", &ben()));
    let api = client(&store, &transport);

    let resp = block_on(login(&api, "ben@example.com", "emp123")).unwrap();

    assert_eq!(resp.token, "tok");
    assert_eq!(resp.user.role, Role::Employee);
    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.header("Authorization"), None);
    let body: Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "email": "ben@example.com", "password": "emp123" }));
}

#[test]
fn list_tasks_parses_records() {
    let store = Rc::new(MemoryStore::with_token("tok"));
    let transport = MockTransport::new();
    transport.respond(
        200,
        json!({ "data": [
            { "_id": "t1", "title": "A", "status": "pending", "assignedTo": user_json(&ben()) },
            { "_id": "t2", "title": "B", "status": "in progress", "assignedTo": "u2" }
        ] }),
    );
    let api = client(&store, &transport);

    let tasks = block_on(list_tasks(&api)).unwrap();

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[1].status, TaskStatus::InProgress);
    assert_eq!(tasks[0].assignee_id(), Some("u2"));
}

#[test]
fn list_users_parses_directory() {
    let store = Rc::new(MemoryStore::with_token("tok"));
    let transport = MockTransport::new();
    transport.respond(200, json!({ "data": [user_json(&ana()), user_json(&ben())] }));
    let api = client(&store, &transport);

    let users = block_on(list_users(&api)).unwrap();

    assert_eq!(users, vec![ana(), ben()]);
}

#[test]
fn update_task_puts_partial_body() {
    let store = Rc::new(MemoryStore::with_token("tok"));
    let transport = MockTransport::new();
    transport.respond(200, json!({ "_id": "t1", "title": "A", "status": "completed" }));
    let api = client(&store, &transport);

    let task = block_on(update_task(&api, "t1", &TaskUpdate::status(TaskStatus::Completed))).unwrap();

    assert_eq!(task.status, TaskStatus::Completed);
    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method, Method::Put);
    assert_eq!(sent.url, format!("{BASE_URL}/api/tasks/t1"));
    assert_eq!(sent.body.as_deref(), Some(r#"{"status":"completed"}"#));
}

#[test]
fn delete_task_accepts_empty_body() {
    let store = Rc::new(MemoryStore::with_token("tok"));
    let transport = MockTransport::new();
    transport.respond_raw(204, "");
    let api = client(&store, &transport);

    block_on(delete_task(&api, "t1")).unwrap();

    assert_eq!(transport.last_request().unwrap().method, Method::Delete);
}

#[test]
fn create_task_unwraps_envelope() {
    let store = Rc::new(MemoryStore::with_token("tok"));
    let transport = MockTransport::new();
    transport.respond(201, json!({ "data": { "_id": "t9", "title": "New", "assignedTo": "u2" } }));
    let api = client(&store, &transport);

    let task = block_on(create_task(
        &api,
        &NewTask {
            title: "New".into(),
            description: String::new(),
            priority: crate::net::types::Priority::High,
            assigned_to: "u2".into(),
            due_date: None,
        },
    ))
    .unwrap();

    assert_eq!(task.id, "t9");
}
