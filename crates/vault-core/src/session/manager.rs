//! Session struct, transcript access, and the draft buffer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use vault_common::types::DEFAULT_WELCOME_MESSAGE;
use vault_common::{EventBus, SessionEvent, SessionId, Turn};

/// Transcript and draft. Locked only for synchronous updates, never
/// across an `.await`.
pub(super) struct SessionState {
    pub(super) transcript: Vec<Turn>,
    pub(super) draft: String,
}

impl SessionState {
    /// Append a turn and tell subscribers where it landed.
    pub(super) fn append(&mut self, events: &EventBus, turn: Turn) {
        let index = self.transcript.len();
        self.transcript.push(turn.clone());
        events.publish(SessionEvent::TurnAppended { index, turn });
    }
}

/// One linear conversation with the Vault.
pub struct Session {
    pub(super) id: SessionId,
    pub(super) state: Mutex<SessionState>,
    /// Whether an operation is in flight. Set only under the `state` lock.
    pub(super) pending: AtomicBool,
    pub(super) events: EventBus,
}

impl Session {
    /// Start a session seeded with one assistant welcome turn.
    pub fn new(welcome_message: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            state: Mutex::new(SessionState {
                transcript: vec![Turn::assistant(welcome_message)],
                draft: String::new(),
            }),
            pending: AtomicBool::new(false),
            events: EventBus::default(),
        }
    }

    pub(super) fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        // Appends are single pushes, so a poisoned state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Receive every subsequent state change.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the full transcript, oldest first.
    pub fn transcript(&self) -> Vec<Turn> {
        self.lock_state().transcript.clone()
    }

    pub fn turn_count(&self) -> usize {
        self.lock_state().transcript.len()
    }

    pub fn last_turn(&self) -> Option<Turn> {
        self.lock_state().transcript.last().cloned()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    pub fn draft(&self) -> String {
        self.lock_state().draft.clone()
    }

    /// Replace the not-yet-submitted query text.
    pub fn set_draft(&self, text: impl Into<String>) {
        let text = text.into();
        self.lock_state().draft.clone_from(&text);
        self.events.publish(SessionEvent::DraftChanged(text));
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_WELCOME_MESSAGE)
    }
}
