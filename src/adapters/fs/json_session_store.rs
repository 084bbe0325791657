//! JSON file-based session store.
//!
//! One file per session under the base directory. Writes go through a
//! temp-file rename so a crash mid-write never leaves a truncated snapshot.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::session::Session;
use crate::ports::SessionStore;

/// File-based implementation of SessionStore.
#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    base_path: PathBuf,
}

impl JsonSessionStore {
    /// Creates a store rooted at the given snapshot directory.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn snapshot_path(&self, id: &SessionId) -> PathBuf {
        self.base_path.join(format!("{}.json", id))
    }

    fn temp_path(&self, id: &SessionId) -> PathBuf {
        self.base_path.join(format!("{}.json.tmp", id))
    }

    async fn ensure_dir(&self) -> Result<(), DomainError> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            DomainError::new(
                ErrorCode::PersistenceWrite,
                format!("Failed to create snapshot directory: {}", e),
            )
        })
    }
}

#[async_trait]
impl SessionStore for JsonSessionStore {
    async fn upsert(&self, session: &Session) -> Result<(), DomainError> {
        self.ensure_dir().await?;

        let json = serde_json::to_vec_pretty(session).map_err(|e| {
            DomainError::new(
                ErrorCode::PersistenceWrite,
                format!("Failed to serialize session {}: {}", session.id(), e),
            )
        })?;

        let temp = self.temp_path(session.id());
        fs::write(&temp, json).await.map_err(|e| {
            DomainError::new(
                ErrorCode::PersistenceWrite,
                format!("Failed to write snapshot {}: {}", temp.display(), e),
            )
        })?;
        fs::rename(&temp, self.snapshot_path(session.id()))
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::PersistenceWrite,
                    format!("Failed to commit snapshot for {}: {}", session.id(), e),
                )
            })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let path = self.snapshot_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).await.map_err(|e| {
            DomainError::new(
                ErrorCode::StorageError,
                format!("Failed to read snapshot {}: {}", path.display(), e),
            )
        })?;

        let session: Session = serde_json::from_str(&json).map_err(|e| {
            DomainError::new(
                ErrorCode::CorruptSession,
                format!("Snapshot {} is unreadable: {}", path.display(), e),
            )
        })?;

        Ok(Some(session))
    }

    async fn delete(&self, id: &SessionId) -> Result<(), DomainError> {
        let path = self.snapshot_path(id);
        if path.exists() {
            fs::remove_file(&path).await.map_err(|e| {
                DomainError::new(
                    ErrorCode::StorageError,
                    format!("Failed to delete snapshot {}: {}", path.display(), e),
                )
            })?;
        }
        Ok(())
    }
}
