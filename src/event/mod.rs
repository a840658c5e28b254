mod bus;
mod events;
mod handlers;

pub use bus::{EventBus, Subscription};
pub use events::DocumentEvent;
pub use handlers::EventLog;

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &DocumentEvent);
}
