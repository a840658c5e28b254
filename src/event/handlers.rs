use std::sync::Arc;

use parking_lot::Mutex;

use crate::event::{DocumentEvent, EventHandler};

/// Records every event it sees. Clones share the same log, so one clone can be
/// subscribed while another is kept to read from.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<DocumentEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DocumentEvent> {
        self.events.lock().clone()
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<DocumentEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventHandler for EventLog {
    fn handle_event(&mut self, event: &DocumentEvent) {
        self.events.lock().push(event.clone());
    }
}
