use super::*;

fn recorder(events: &SessionEvents) -> Rc<RefCell<Vec<SessionEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    events.subscribe(move |event| sink.borrow_mut().push(event));
    seen
}

#[test]
fn emit_reaches_every_listener_once() {
    let events = SessionEvents::new();
    let first = recorder(&events);
    let second = recorder(&events);

    events.emit(SessionEvent::Expired);

    assert_eq!(*first.borrow(), vec![SessionEvent::Expired]);
    assert_eq!(*second.borrow(), vec![SessionEvent::Expired]);
}

#[test]
fn clones_share_listeners() {
    let events = SessionEvents::new();
    let seen = recorder(&events);
    events.clone().emit(SessionEvent::LoggedOut);
    assert_eq!(*seen.borrow(), vec![SessionEvent::LoggedOut]);
}

#[test]
fn unsubscribe_stops_delivery() {
    let events = SessionEvents::new();
    let count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&count);
    let id = events.subscribe(move |_| counter.set(counter.get() + 1));

    events.emit(SessionEvent::Expired);
    events.unsubscribe(id);
    events.emit(SessionEvent::Expired);

    assert_eq!(count.get(), 1);
    assert_eq!(events.listener_count(), 0);
}

#[test]
fn listener_may_subscribe_during_emit() {
    let events = SessionEvents::new();
    let inner = events.clone();
    events.subscribe(move |_| {
        inner.subscribe(|_| {});
    });

    events.emit(SessionEvent::Expired);

    assert_eq!(events.listener_count(), 2);
}
