//! In-memory session store.
//!
//! Keeps full snapshots in a map. Used by tests and by the demo when no
//! durable store is configured; sessions do not survive a restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::session::Session;
use crate::ports::SessionStore;

/// In-memory implementation of SessionStore.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    snapshots: Mutex<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots
            .lock()
            .expect("session store lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn upsert(&self, session: &Session) -> Result<(), DomainError> {
        self.snapshots
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::PersistenceWrite, "Session store lock poisoned"))?
            .insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let snapshots = self
            .snapshots
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::StorageError, "Session store lock poisoned"))?;
        Ok(snapshots.get(id).cloned())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), DomainError> {
        self.snapshots
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::StorageError, "Session store lock poisoned"))?
            .remove(id);
        Ok(())
    }
}
