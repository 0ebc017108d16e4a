//! The three backend operations: query, note ingestion, PDF ingestion.

use std::path::Path;

use tracing::{debug, warn};
use vault_common::{new_correlation_id, SessionEvent, Turn};

use crate::capability::{FilePicker, NotePrompt};
use crate::{BackendError, PdfUpload, VaultBackend};

use super::manager::Session;
use super::types::{
    OperationOutcome, PendingGuard, RejectReason, NOTE_ERROR_MESSAGE, PDF_ERROR_MESSAGE,
    QUERY_ERROR_MESSAGE,
};

impl Session {
    /// Submit the draft as a question.
    ///
    /// The user turn holds the draft as typed; the backend receives it
    /// trimmed. The draft is cleared whether or not the request succeeds.
    pub async fn submit_query(&self, backend: &dyn VaultBackend) -> OperationOutcome {
        let (guard, prompt) = {
            let mut state = self.lock_state();
            let prompt = state.draft.trim().to_string();
            if prompt.is_empty() {
                debug!(session = %self.id.short(), "query rejected: empty draft");
                return OperationOutcome::Rejected(RejectReason::EmptyInput);
            }
            if self.is_pending() {
                debug!(session = %self.id.short(), "query rejected: busy");
                return OperationOutcome::Rejected(RejectReason::Busy);
            }

            let draft = std::mem::take(&mut state.draft);
            state.append(&self.events, Turn::user(draft));
            self.events.publish(SessionEvent::DraftChanged(String::new()));
            let guard = PendingGuard::acquire(self, &mut state, QUERY_ERROR_MESSAGE);
            (guard, prompt)
        };
        guard.announce();

        let op = new_correlation_id();
        debug!(session = %self.id.short(), %op, "query started");
        let result = backend.query(&prompt).await;
        self.settle(guard, &op, "query", result, |answer| {
            Turn::answer(answer.response, answer.source)
        })
    }

    /// Ask `prompt` for note text and store it in the Vault.
    ///
    /// Prompting adds nothing to the transcript; only the outcome does.
    pub async fn ingest_note(
        &self,
        backend: &dyn VaultBackend,
        prompt: &mut dyn NotePrompt,
    ) -> OperationOutcome {
        if self.is_pending() {
            debug!(session = %self.id.short(), "note rejected: busy");
            return OperationOutcome::Rejected(RejectReason::Busy);
        }

        let text = match prompt.prompt_note().await {
            Some(text) if !text.is_empty() => text,
            _ => {
                debug!(session = %self.id.short(), "note cancelled");
                return OperationOutcome::Rejected(RejectReason::EmptyInput);
            }
        };

        // Another operation may have started while the user was typing.
        let Some(guard) = self.try_begin(NOTE_ERROR_MESSAGE) else {
            debug!(session = %self.id.short(), "note rejected: busy");
            return OperationOutcome::Rejected(RejectReason::Busy);
        };
        guard.announce();

        let op = new_correlation_id();
        debug!(session = %self.id.short(), %op, len = text.len(), "note upload started");
        let result = backend.ingest_text(&text).await;
        self.settle(guard, &op, "note upload", result, |receipt| {
            Turn::assistant(receipt.message)
        })
    }

    /// Ask `picker` for a PDF and upload it to the Vault.
    pub async fn ingest_file(
        &self,
        backend: &dyn VaultBackend,
        picker: &mut dyn FilePicker,
    ) -> OperationOutcome {
        if self.is_pending() {
            debug!(session = %self.id.short(), "file rejected: busy");
            return OperationOutcome::Rejected(RejectReason::Busy);
        }

        let Some(path) = picker.pick_pdf().await else {
            debug!(session = %self.id.short(), "no file selected");
            return OperationOutcome::Rejected(RejectReason::NoFileSelected);
        };

        let Some(guard) = self.try_begin(PDF_ERROR_MESSAGE) else {
            debug!(session = %self.id.short(), "file rejected: busy");
            return OperationOutcome::Rejected(RejectReason::Busy);
        };
        guard.announce();

        let op = new_correlation_id();
        debug!(session = %self.id.short(), %op, path = %path.display(), "PDF upload started");
        let result = match read_upload(&path).await {
            Ok(upload) => backend.ingest_pdf(upload).await,
            Err(e) => Err(e),
        };
        self.settle(guard, &op, "PDF upload", result, |receipt| {
            Turn::assistant(receipt.message)
        })
    }

    /// Take the pending flag for an operation that records no turn up front.
    fn try_begin(&self, error_message: &'static str) -> Option<PendingGuard<'_>> {
        let mut state = self.lock_state();
        if self.is_pending() {
            return None;
        }
        Some(PendingGuard::acquire(self, &mut state, error_message))
    }

    /// Append the success or error turn for a finished request, then
    /// release the pending flag.
    fn settle<T>(
        &self,
        guard: PendingGuard<'_>,
        op: &str,
        what: &str,
        result: Result<T, BackendError>,
        on_success: impl FnOnce(T) -> Turn,
    ) -> OperationOutcome {
        match result {
            Ok(value) => {
                guard.finish(on_success(value));
                debug!(session = %self.id.short(), %op, "{what} completed");
                OperationOutcome::Completed
            }
            Err(e) => {
                warn!(session = %self.id.short(), %op, error = %e, "{what} failed");
                guard.fail();
                OperationOutcome::Failed(e)
            }
        }
    }
}

async fn read_upload(path: &Path) -> Result<PdfUpload, BackendError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| BackendError::File(format!("failed to read {}: {e}", path.display())))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.pdf".to_string());
    Ok(PdfUpload { file_name, bytes })
}
