//! Session store port.
//!
//! Durable snapshot persistence for sessions. Every write replaces the whole
//! snapshot; no partial-field updates are assumed, which keeps resume
//! semantics a pure full-snapshot read.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::Session;

/// Port for session snapshot persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Writes the full session snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// - `PersistenceWrite` on write failure (non-fatal to the live session)
    async fn upsert(&self, session: &Session) -> Result<(), DomainError>;

    /// Reads the snapshot for a session id.
    ///
    /// Returns `None` if no snapshot exists.
    ///
    /// # Errors
    ///
    /// - `CorruptSession` if a stored payload cannot be decoded
    /// - `StorageError` on infrastructure failure
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Deletes a snapshot (primarily for tests and cleanup).
    ///
    /// # Errors
    ///
    /// - `StorageError` on infrastructure failure
    async fn delete(&self, id: &SessionId) -> Result<(), DomainError>;
}
