//! Document Event Registry
//!
//! The document gets one set of pointer and keyboard listeners for the whole
//! page. Each bound board registers a handler here and removes it when its
//! reactive scope is cleaned up.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Document-level input forwarded to every registered board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEvent {
    Move { x: i32, y: i32 },
    Release,
    Escape,
}

/// Handle returned by [`register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(usize);

type Handler = Rc<dyn Fn(&DocumentEvent)>;

thread_local! {
    static HANDLERS: RefCell<Vec<(HandlerId, Handler)>> = const { RefCell::new(Vec::new()) };
    static NEXT_ID: Cell<usize> = const { Cell::new(0) };
}

pub fn register(handler: impl Fn(&DocumentEvent) + 'static) -> HandlerId {
    let id = HandlerId(NEXT_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    }));
    HANDLERS.with(|handlers| handlers.borrow_mut().push((id, Rc::new(handler))));
    id
}

/// Removing an id twice is a no-op
pub fn unregister(id: HandlerId) {
    HANDLERS.with(|handlers| handlers.borrow_mut().retain(|(handler_id, _)| *handler_id != id));
}

/// Run every registered handler. Handlers may register or unregister
/// while running; the set seen here is the one at dispatch time.
pub fn dispatch(event: &DocumentEvent) {
    let current: Vec<Handler> = HANDLERS.with(|handlers| handlers.borrow().iter().map(|(_, h)| h.clone()).collect());
    for handler in current {
        handler(event);
    }
}

pub fn handler_count() -> usize {
    HANDLERS.with(|handlers| handlers.borrow().len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_reaches_registered_handlers_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let base = handler_count();

        let log = seen.clone();
        let first = register(move |ev| log.borrow_mut().push(("first", *ev)));
        let log = seen.clone();
        let second = register(move |ev| log.borrow_mut().push(("second", *ev)));
        assert_eq!(handler_count(), base + 2);

        dispatch(&DocumentEvent::Move { x: 4, y: 9 });
        unregister(first);
        dispatch(&DocumentEvent::Escape);
        unregister(second);
        unregister(second);
        dispatch(&DocumentEvent::Release);

        assert_eq!(
            *seen.borrow(),
            [
                ("first", DocumentEvent::Move { x: 4, y: 9 }),
                ("second", DocumentEvent::Move { x: 4, y: 9 }),
                ("second", DocumentEvent::Escape),
            ]
        );
        assert_eq!(handler_count(), base);
    }

    #[test]
    fn test_remount_does_not_accumulate_handlers() {
        let base = handler_count();
        for _ in 0..5 {
            let id = register(|_| {});
            unregister(id);
        }
        assert_eq!(handler_count(), base);
    }

    #[test]
    fn test_handler_may_unregister_itself() {
        let slot: Rc<Cell<Option<HandlerId>>> = Rc::new(Cell::new(None));
        let calls = Rc::new(Cell::new(0));

        let (own, count) = (slot.clone(), calls.clone());
        let id = register(move |_| {
            count.set(count.get() + 1);
            if let Some(id) = own.get() {
                unregister(id);
            }
        });
        slot.set(Some(id));

        dispatch(&DocumentEvent::Release);
        dispatch(&DocumentEvent::Release);
        assert_eq!(calls.get(), 1);
    }
}
