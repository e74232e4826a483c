//! Decoupled session broadcast.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session manager and request helper live outside the router, so they
//! cannot navigate. They publish here instead; the app shell subscribes a
//! callback that routes to the sign-in page.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Session lifecycle signal that requires a trip to the sign-in page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The authority rejected the stored credential.
    Expired,
    /// The user signed out.
    LoggedOut,
}

/// Handle returned by [`SessionEvents::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(SessionEvent)>;

/// Cheaply cloneable listener registry; clones share listeners.
#[derive(Clone, Default)]
pub struct SessionEvents {
    listeners: Rc<RefCell<Vec<(ListenerId, Listener)>>>,
    next_id: Rc<Cell<u64>>,
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(SessionEvent) + 'static,
    {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(existing, _)| *existing != id);
    }

    /// Deliver `event` to every listener registered at the time of the call.
    ///
    /// Listeners may subscribe or unsubscribe re-entrantly; changes apply to
    /// the next emit.
    pub fn emit(&self, event: SessionEvent) {
        let snapshot: Vec<Listener> = self.listeners.borrow().iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in snapshot {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}
