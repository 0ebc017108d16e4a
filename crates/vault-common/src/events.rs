use tokio::sync::broadcast;

use crate::types::Turn;

/// State changes published by a conversation session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A turn was appended at `index` in the transcript.
    TurnAppended { index: usize, turn: Turn },
    /// The in-flight flag flipped.
    PendingChanged(bool),
    /// The draft buffer was replaced or cleared.
    DraftChanged(String),
}

pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: SessionEvent) -> usize {
        match self.sender.send(event) {
            Ok(n) => n,
            Err(_) => {
                tracing::trace!("session event dropped, no subscribers");
                0
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
