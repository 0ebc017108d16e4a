//! HTTP backend struct, endpoint resolution, and response decoding.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::BackendError;

use super::config::HttpBackendConfig;

pub(crate) const CHAT_PATH: &str = "/chat";
pub(crate) const UPLOAD_TEXT_PATH: &str = "/upload/text";
pub(crate) const UPLOAD_PDF_PATH: &str = "/upload/pdf";

/// Vault REST client.
pub struct HttpBackend {
    pub(crate) base_url: String,
    pub(crate) http: reqwest::Client,
}

/// Error body of a non-2xx response.
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl HttpBackend {
    pub fn new(config: HttpBackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Map a transport error from `send()`.
pub(crate) fn send_error(e: reqwest::Error) -> BackendError {
    if e.is_timeout() {
        BackendError::Timeout
    } else {
        BackendError::Network(e.to_string())
    }
}

/// Check the status and decode a JSON body into `T`.
pub(crate) async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(BackendError::Status {
            status: status.as_u16(),
            detail: error_detail(&text),
        });
    }

    let bytes = response.bytes().await.map_err(send_error)?;
    serde_json::from_slice(&bytes).map_err(|e| BackendError::Parse(e.to_string()))
}

/// Pull `detail` out of an error body, falling back to the raw text.
pub(crate) fn error_detail(text: &str) -> String {
    match serde_json::from_str::<ErrorBody>(text) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(s),
        }) => s,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => text.chars().take(200).collect(),
    }
}
