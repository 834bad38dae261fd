//! Error types for the signup flow core.
//!
//! Field-level validation problems are *data* (`FieldErrors` maps), not
//! errors — only API misuse and side-effect failures surface as `Err`.

use crate::flow::step::StepId;

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Orchestrator API misuse — bad step ids or collection indices.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Step {id} is not part of this flow")]
    UnknownStep { id: StepId },

    #[error("No {collection} entry at index {index} (len {len})")]
    EntryOutOfRange {
        collection: &'static str,
        index: usize,
        len: usize,
    },
}

/// Registration backend failures.
///
/// Single-shot semantics: the client never retries internally; the
/// sequencer surfaces these under the reserved `submit` error key and
/// the user retries by advancing again.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistrationError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Registration rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Login response contained no access token")]
    MissingToken,

    #[error("Invalid response from registration backend: {0}")]
    InvalidResponse(String),
}

/// Session hand-off failures. Never block the flow; the sequencer logs
/// and moves on.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to write session: {0}")]
    Write(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
