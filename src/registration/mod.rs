//! Registration backend boundary.
//!
//! The sequencer only ever talks to [`RegistrationClient`]; the HTTP
//! implementation lives here too, but tests and embedders are free to
//! supply their own. Raw backend JSON is normalized into canonical
//! shapes ([`AuthResult`], [`RegisteredUser`]) at this boundary — the
//! orchestrator never probes response fields itself.

pub mod auth;
pub mod client;
pub mod payload;

pub use auth::{extract_access_token, AuthResult};
pub use client::{HttpRegistrationClient, RegisteredUser, RegistrationClient};
pub use payload::RegisterPayload;
