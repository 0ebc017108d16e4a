//! Client core for The Vault.
//!
//! Provides:
//! - The `VaultBackend` trait and its HTTP implementation
//! - The conversation `Session` state machine (query, note and PDF ingestion)
//! - Injected input capabilities for note text and file selection

pub mod capability;
pub mod http;
pub mod session;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use capability::{has_pdf_extension, FilePicker, NotePrompt};
pub use http::{HttpBackend, HttpBackendConfig};
pub use session::{OperationOutcome, RejectReason, Session};

/// The remote knowledge service. Each method is exactly one request.
#[async_trait]
pub trait VaultBackend: Send + Sync {
    /// Ask a question (`POST /chat`).
    async fn query(&self, prompt: &str) -> Result<QueryAnswer, BackendError>;

    /// Store a free-text note (`POST /upload/text`).
    async fn ingest_text(&self, text: &str) -> Result<IngestReceipt, BackendError>;

    /// Store a PDF document (`POST /upload/pdf`, multipart).
    async fn ingest_pdf(&self, upload: PdfUpload) -> Result<IngestReceipt, BackendError>;
}

/// Successful `/chat` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAnswer {
    pub response: String,
    #[serde(default)]
    pub source: Option<String>,
}

/// Successful ingestion response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReceipt {
    pub message: String,
    /// Informational only, e.g. `"stored"`.
    #[serde(default)]
    pub status: Option<String>,
}

/// A PDF read from disk, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Timeout")]
    Timeout,
    #[error("File error: {0}")]
    File(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_answer_source_is_optional() {
        let answer: QueryAnswer = serde_json::from_str(r#"{"response":"X is Y"}"#).unwrap();
        assert_eq!(answer.response, "X is Y");
        assert!(answer.source.is_none());
    }

    #[test]
    fn query_answer_requires_response() {
        let result: Result<QueryAnswer, _> = serde_json::from_str(r#"{"source":"doc1.pdf"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn ingest_receipt_reads_status() {
        let receipt: IngestReceipt =
            serde_json::from_str(r#"{"status":"stored","message":"Saved."}"#).unwrap();
        assert_eq!(receipt.message, "Saved.");
        assert_eq!(receipt.status.as_deref(), Some("stored"));
    }

    #[test]
    fn backend_error_display() {
        let err = BackendError::Status {
            status: 500,
            detail: "Content is empty".into(),
        };
        assert_eq!(err.to_string(), "HTTP 500: Content is empty");
        assert_eq!(BackendError::Timeout.to_string(), "Timeout");
    }
}
