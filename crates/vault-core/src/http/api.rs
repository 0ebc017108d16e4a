//! VaultBackend trait implementation for HttpBackend.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::{BackendError, IngestReceipt, PdfUpload, QueryAnswer, VaultBackend};

use super::client::{decode, send_error, HttpBackend, CHAT_PATH, UPLOAD_PDF_PATH, UPLOAD_TEXT_PATH};

const PDF_MIME: &str = "application/pdf";

#[derive(Serialize)]
struct ChatRequest<'a> {
    prompt: &'a str,
}

#[derive(Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

#[async_trait]
impl VaultBackend for HttpBackend {
    async fn query(&self, prompt: &str) -> Result<QueryAnswer, BackendError> {
        let url = self.endpoint(CHAT_PATH);
        debug!(%url, len = prompt.len(), "Vault query request");

        let response = self
            .http
            .post(&url)
            .json(&ChatRequest { prompt })
            .send()
            .await
            .map_err(send_error)?;

        decode(response).await
    }

    async fn ingest_text(&self, text: &str) -> Result<IngestReceipt, BackendError> {
        let url = self.endpoint(UPLOAD_TEXT_PATH);
        debug!(%url, len = text.len(), "Vault note upload");

        let response = self
            .http
            .post(&url)
            .json(&TextRequest { text })
            .send()
            .await
            .map_err(send_error)?;

        let receipt: IngestReceipt = decode(response).await?;
        debug!(status = ?receipt.status, "Vault note stored");
        Ok(receipt)
    }

    async fn ingest_pdf(&self, upload: PdfUpload) -> Result<IngestReceipt, BackendError> {
        let url = self.endpoint(UPLOAD_PDF_PATH);
        debug!(
            %url,
            file = %upload.file_name,
            size = upload.bytes.len(),
            "Vault PDF upload"
        );

        let file_part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(PDF_MIME)
            .map_err(|e| BackendError::Network(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", file_part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(send_error)?;

        let receipt: IngestReceipt = decode(response).await?;
        debug!(status = ?receipt.status, "Vault PDF stored");
        Ok(receipt)
    }
}
