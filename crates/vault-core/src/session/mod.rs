//! Conversation session management.
//!
//! A `Session` holds the transcript and the draft query, and runs the
//! three backend operations against it one at a time.

mod manager;
mod operations;
mod types;


pub use manager::Session;
pub use types::{
    OperationOutcome, RejectReason, NOTE_ERROR_MESSAGE, PDF_ERROR_MESSAGE, QUERY_ERROR_MESSAGE,
};
