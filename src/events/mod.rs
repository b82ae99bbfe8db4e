mod event_bus;
mod types;

pub use event_bus::{EventSubscriber, PlayerEventBus};
pub use types::PlayerEvent;
