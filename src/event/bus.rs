use std::cell::{Cell, RefCell};
use std::fmt;

use crate::event::{DocumentEvent, EventHandler};

/// Handle returned by [`EventBus::subscribe`], used to detach the handler again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Fans document events out to subscribed handlers.
///
/// Delivery is synchronous and in subscription order. Handlers only see a borrowed
/// event, never the document, so they cannot re-enter an edit while one is being
/// reported.
#[derive(Default)]
pub struct EventBus {
    handlers: RefCell<Vec<(Subscription, Box<dyn EventHandler>)>>,
    next: Cell<u64>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handler_count())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) -> Subscription {
        let subscription = Subscription(self.next.get());
        self.next.set(subscription.0 + 1);
        self.handlers.borrow_mut().push((subscription, handler));
        subscription
    }

    /// Detaches a handler. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(s, _)| *s != subscription);
        handlers.len() != before
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn emit(&self, event: DocumentEvent) {
        for (_, handler) in self.handlers.borrow_mut().iter_mut() {
            handler.handle_event(&event);
        }
    }
}
