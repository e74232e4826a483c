//! Scripted transports and fixtures shared by the session-core tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures::channel::oneshot;
use serde_json::{Value, json};

use super::error::TransportError;
use super::request::ApiClient;
use super::transport::{HttpRequest, HttpResponse, Transport};
use super::types::{Role, SessionUser};
use crate::config::ApiConfig;
use crate::util::events::{SessionEvent, SessionEvents};
use crate::util::storage::{CredentialStore, MemoryStore, StorageError};

pub const BASE_URL: &str = "http://api.test";

/// One scripted reply: an HTTP response, a network failure, or a reply the
/// test releases later through a oneshot channel.
pub enum Reply {
    Ready(Result<HttpResponse, TransportError>),
    Gated(oneshot::Receiver<HttpResponse>),
}

/// Transport answering requests in FIFO order from a script.
#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<VecDeque<Reply>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: Value) {
        let body = if body.is_null() { String::new() } else { body.to_string() };
        self.respond_raw(status, &body);
    }

    pub fn respond_raw(&self, status: u16, body: &str) {
        self.replies
            .borrow_mut()
            .push_back(Reply::Ready(Ok(HttpResponse { status, body: body.to_owned() })));
    }

    pub fn fail(&self, message: &str) {
        self.replies
            .borrow_mut()
            .push_back(Reply::Ready(Err(TransportError::Network(message.to_owned()))));
    }

    /// Queue a reply the test sends later; returns its sender.
    pub fn gate(&self) -> oneshot::Sender<HttpResponse> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(Reply::Gated(rx));
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Gated(rx)) => rx.await.map_err(|_| TransportError::Network("gate dropped".to_owned())),
            None => Err(TransportError::Network("no scripted reply".to_owned())),
        }
    }
}

/// Store whose writes always fail.
#[derive(Default)]
pub struct ReadOnlyStore {
    inner: MemoryStore,
}

impl CredentialStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write("QuotaExceededError".to_owned()))
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key);
    }
}

/// API client over a memory store and scripted transport.
pub fn client(store: &Rc<MemoryStore>, transport: &Rc<MockTransport>) -> ApiClient {
    ApiClient::new(
        ApiConfig::new(BASE_URL),
        Rc::clone(store) as Rc<dyn CredentialStore>,
        Rc::clone(transport) as Rc<dyn Transport>,
        SessionEvents::new(),
    )
}

/// Count of `SessionEvent::Expired` / `LoggedOut` deliveries.
pub struct EventCounter {
    pub expired: Rc<Cell<usize>>,
    pub logged_out: Rc<Cell<usize>>,
}

pub fn count_events(events: &SessionEvents) -> EventCounter {
    let expired = Rc::new(Cell::new(0));
    let logged_out = Rc::new(Cell::new(0));
    let (e, l) = (Rc::clone(&expired), Rc::clone(&logged_out));
    events.subscribe(move |event| match event {
        SessionEvent::Expired => e.set(e.get() + 1),
        SessionEvent::LoggedOut => l.set(l.get() + 1),
    });
    EventCounter { expired, logged_out }
}

pub fn ana() -> SessionUser {
    SessionUser { id: "u1".into(), name: "Ana".into(), email: "ana@example.com".into(), role: Role::Admin }
}

pub fn ben() -> SessionUser {
    SessionUser { id: "u2".into(), name: "Ben".into(), email: "ben@example.com".into(), role: Role::Employee }
}

pub fn user_json(user: &SessionUser) -> Value {
    json!({ "_id": user.id, "name": user.name, "email": user.email, "role": user.role.as_str() })
}

pub fn auth_response(token: &str, user: &SessionUser) -> Value {
    json!({ "token": token, "user": user_json(user) })
}

pub fn me_response(user: &SessionUser) -> Value {
    json!({ "data": user_json(user) })
}

pub fn ok(body: Value) -> HttpResponse {
    HttpResponse { status: 200, body: body.to_string() }
}
