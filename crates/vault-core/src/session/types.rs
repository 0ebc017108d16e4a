//! Session outcome types and the in-flight guard.

use std::sync::atomic::Ordering;

use tracing::warn;
use vault_common::{SessionEvent, Turn};

use crate::BackendError;

use super::manager::{Session, SessionState};

pub const QUERY_ERROR_MESSAGE: &str = "Error connecting to The Vault.";
pub const NOTE_ERROR_MESSAGE: &str = "Error uploading note.";
pub const PDF_ERROR_MESSAGE: &str = "Error uploading PDF.";

/// Why an operation was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Draft was blank, or the note prompt was cancelled.
    EmptyInput,
    /// Another operation is in flight.
    Busy,
    NoFileSelected,
}

/// Result of one session operation.
///
/// `Failed` is informational: the error turn is already in the transcript.
#[derive(Debug)]
pub enum OperationOutcome {
    Rejected(RejectReason),
    Completed,
    Failed(BackendError),
}

/// Holds the pending flag for one operation.
///
/// The operation ends by handing its result turn to [`PendingGuard::finish`].
/// If the guard is dropped first (the caller dropped the future mid-request),
/// the operation's error turn is appended instead, so a started operation
/// always leaves the transcript ending on an assistant turn. The flag is
/// cleared on every exit path.
pub(super) struct PendingGuard<'a> {
    session: &'a Session,
    error_message: &'static str,
    settled: bool,
}

impl<'a> PendingGuard<'a> {
    /// Set the flag for a new operation.
    ///
    /// The flag is only ever set under the state lock, after the caller has
    /// seen it clear and recorded any turns the operation starts with. A
    /// reader that sees it set therefore also sees those turns.
    pub(super) fn acquire(
        session: &'a Session,
        _state: &mut SessionState,
        error_message: &'static str,
    ) -> Self {
        session.pending.store(true, Ordering::Release);
        Self {
            session,
            error_message,
            settled: false,
        }
    }

    /// Tell subscribers the operation is now in flight.
    pub(super) fn announce(&self) {
        self.session
            .events
            .publish(SessionEvent::PendingChanged(true));
    }

    /// Append the operation's result turn and release the flag.
    pub(super) fn finish(mut self, turn: Turn) {
        self.append(turn);
        self.settled = true;
    }

    /// Append the operation's fixed error turn and release the flag.
    pub(super) fn fail(self) {
        let turn = Turn::assistant(self.error_message);
        self.finish(turn);
    }

    fn append(&self, turn: Turn) {
        self.session
            .lock_state()
            .append(&self.session.events, turn);
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!(session = %self.session.id.short(), "operation dropped before it settled");
            self.append(Turn::assistant(self.error_message));
        }
        self.session.pending.store(false, Ordering::Release);
        self.session
            .events
            .publish(SessionEvent::PendingChanged(false));
    }
}
