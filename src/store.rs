//! One-way session hand-off to durable storage.
//!
//! After a successful registration gate the sequencer writes the
//! authenticated session out for later page loads to pick up. The core
//! only ever writes — it never reads a session back mid-flow — and a
//! failed write is logged, not surfaced.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::StoreError;

/// The authenticated session captured by the registration gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// The signup session that produced this auth session.
    pub session_id: Uuid,
    pub user_id: String,
    pub access_token: String,
    pub obtained_at: DateTime<Utc>,
}

/// Write-only sink for authenticated sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn put_session(&self, session: &AuthSession) -> Result<(), StoreError>;
}

/// Discards every session. The default when the embedder does not care
/// about cross-load reuse.
pub struct NullSessionStore;

#[async_trait]
impl SessionStore for NullSessionStore {
    async fn put_session(&self, _session: &AuthSession) -> Result<(), StoreError> {
        Ok(())
    }
}

/// In-memory sink, mainly for tests and local tooling.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<Vec<AuthSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far.
    pub async fn sessions(&self) -> Vec<AuthSession> {
        self.sessions.lock().await.clone()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn put_session(&self, session: &AuthSession) -> Result<(), StoreError> {
        self.sessions.lock().await.push(session.clone());
        Ok(())
    }
}
