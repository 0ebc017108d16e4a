//! HTTP client for the Vault REST API.
//!
//! Implements `VaultBackend` over JSON and multipart requests against a
//! base URL fixed at construction.

mod api;
mod client;
mod config;


pub use client::HttpBackend;
pub use config::HttpBackendConfig;
