use anyhow::Result;
use tokio::sync::broadcast;
use tracing::trace;

use super::types::PlayerEvent;

/// Broadcast bus for [`PlayerEvent`]s.
///
/// Cheap to clone; every component of a session holds a handle and publishes
/// through it. Publishing with no subscribers is not an error.
#[derive(Debug, Clone)]
pub struct PlayerEventBus {
    sender: broadcast::Sender<PlayerEvent>,
}

impl PlayerEventBus {
    /// Create a new bus with the given buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: PlayerEvent) {
        trace!("Publishing event: {}", event.kind());
        // A send error only means there are no subscribers right now.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events.
    pub fn subscribe(&self) -> EventSubscriber {
        EventSubscriber {
            receiver: self.sender.subscribe(),
            kinds: None,
        }
    }

    /// Subscribe to a subset of event kinds (see [`PlayerEvent::kind`]).
    pub fn subscribe_to_kinds(&self, kinds: Vec<&'static str>) -> EventSubscriber {
        EventSubscriber {
            receiver: self.sender.subscribe(),
            kinds: Some(kinds),
        }
    }

    /// Current subscriber count.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for PlayerEventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Event subscriber handle.
pub struct EventSubscriber {
    receiver: broadcast::Receiver<PlayerEvent>,
    kinds: Option<Vec<&'static str>>,
}

impl EventSubscriber {
    /// Receive the next event matching the filter.
    pub async fn recv(&mut self) -> Result<PlayerEvent> {
        loop {
            let event = self.receiver.recv().await?;
            if self.matches(&event) {
                return Ok(event);
            }
        }
    }

    /// Try to receive without blocking.
    pub fn try_recv(&mut self) -> Result<Option<PlayerEvent>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.matches(&event) {
                        return Ok(Some(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Drain everything currently buffered, filter applied.
    pub fn drain(&mut self) -> Vec<PlayerEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.try_recv() {
            events.push(event);
        }
        events
    }

    fn matches(&self, event: &PlayerEvent) -> bool {
        match &self.kinds {
            Some(kinds) => kinds.contains(&event.kind()),
            None => true,
        }
    }
}
