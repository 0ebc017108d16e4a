//! Interactive line-oriented console over a [`Session`].

pub mod commands;
pub mod input;
pub mod render;

use tokio::io::AsyncBufRead;
use vault_core::{OperationOutcome, RejectReason, Session, VaultBackend};

use commands::Command;
use input::{ConsoleFilePicker, ConsoleNotePrompt, LineInput};

pub use render::{render_turn, spawn_renderer};

/// Read commands until `/quit` or end of input.
///
/// Transcript output comes from the renderer task; this loop only prints
/// command feedback.
pub async fn run<R>(session: &Session, backend: &dyn VaultBackend, mut input: LineInput<R>)
where
    R: AsyncBufRead + Unpin + Send,
{
    while let Some(line) = input.next_line().await {
        match commands::parse(&line) {
            Command::Empty => {}
            Command::Ask(text) => {
                session.set_draft(text);
                session.submit_query(backend).await;
            }
            Command::Note => {
                let mut prompt = ConsoleNotePrompt::new(&mut input);
                let outcome = session.ingest_note(backend, &mut prompt).await;
                report_cancel(&outcome, "Note cancelled.");
            }
            Command::Pdf(path) => {
                let mut picker = ConsoleFilePicker::new(&mut input, path);
                let outcome = session.ingest_file(backend, &mut picker).await;
                report_cancel(&outcome, "No file selected.");
            }
            Command::Help => println!("{}", commands::HELP),
            Command::Quit => break,
            Command::Unknown(name) => {
                println!("Unknown command /{name}. Type /help for a list.");
            }
        }
    }
    tracing::debug!(session = %session.id().short(), "console closed");
}

fn report_cancel(outcome: &OperationOutcome, message: &str) {
    if let OperationOutcome::Rejected(RejectReason::EmptyInput | RejectReason::NoFileSelected) =
        outcome
    {
        println!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::io::BufReader;
    use vault_common::Role;
    use vault_core::{BackendError, IngestReceipt, PdfUpload, QueryAnswer};

    use super::*;

    #[derive(Default)]
    struct RecordingVault {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl VaultBackend for RecordingVault {
        async fn query(&self, prompt: &str) -> Result<QueryAnswer, BackendError> {
            self.calls.lock().unwrap().push(format!("query:{prompt}"));
            Ok(QueryAnswer {
                response: format!("answer to {prompt}"),
                source: Some("doc1.pdf".into()),
            })
        }

        async fn ingest_text(&self, text: &str) -> Result<IngestReceipt, BackendError> {
            self.calls.lock().unwrap().push(format!("text:{text}"));
            Ok(IngestReceipt {
                message: "I have memorized this text note.".into(),
                status: Some("stored".into()),
            })
        }

        async fn ingest_pdf(&self, upload: PdfUpload) -> Result<IngestReceipt, BackendError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("pdf:{}", upload.file_name));
            Err(BackendError::Status {
                status: 500,
                detail: "bad pdf".into(),
            })
        }
    }

    fn script(text: &'static str) -> LineInput<BufReader<&'static [u8]>> {
        LineInput::new(BufReader::new(text.as_bytes()))
    }

    #[tokio::test]
    async fn query_then_note_then_quit() {
        let session = Session::default();
        let vault = RecordingVault::default();
        let input = script("  What is X?\n/note\nremember this\n/quit\nnever read\n");

        run(&session, &vault, input).await;

        assert_eq!(
            *vault.calls.lock().unwrap(),
            vec!["query:What is X?", "text:remember this"]
        );
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript[1].role(), Role::User);
        assert_eq!(transcript[1].content(), "  What is X?");
        assert_eq!(transcript[2].source(), Some("doc1.pdf"));
        assert_eq!(transcript[3].content(), "I have memorized this text note.");
        assert!(session.draft().is_empty());
    }

    #[tokio::test]
    async fn cancelled_inputs_leave_transcript_alone() {
        let session = Session::default();
        let vault = RecordingVault::default();
        let input = script("\n/note\n\n/pdf notes.txt\n/help\n/bogus\n");

        run(&session, &vault, input).await;

        assert!(vault.calls.lock().unwrap().is_empty());
        assert_eq!(session.turn_count(), 1);
    }

    #[tokio::test]
    async fn missing_pdf_becomes_error_turn_without_request() {
        let session = Session::default();
        let vault = RecordingVault::default();
        let input = script("/pdf /definitely/not/here.pdf\n");

        run(&session, &vault, input).await;

        assert!(vault.calls.lock().unwrap().is_empty());
        let last = session.last_turn().unwrap();
        assert_eq!(last.content(), vault_core::session::PDF_ERROR_MESSAGE);
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn pdf_upload_failure_appends_error_turn() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();
        let line = format!("/pdf {}\n", path.display());
        let session = Session::default();
        let vault = RecordingVault::default();

        run(
            &session,
            &vault,
            LineInput::new(BufReader::new(line.as_bytes())),
        )
        .await;

        assert_eq!(*vault.calls.lock().unwrap(), vec!["pdf:paper.pdf"]);
        assert_eq!(
            session.last_turn().unwrap().content(),
            "Error uploading PDF."
        );
    }
}
