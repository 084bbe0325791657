//! PostgreSQL implementation of SessionStore.
//!
//! Persists each session as one row with the full aggregate in a JSONB
//! column. Scalar columns are duplicated only for operational queries; the
//! JSONB snapshot is the source of truth on read.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE hearing_sessions (
//!     id UUID PRIMARY KEY,
//!     case_script_id TEXT NOT NULL,
//!     status TEXT NOT NULL,
//!     snapshot JSONB NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL,
//!     updated_at TIMESTAMPTZ NOT NULL
//! );
//! ```

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::session::{Session, SessionStatus};
use crate::ports::SessionStore;

/// PostgreSQL implementation of SessionStore.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    /// Creates a new PostgresSessionStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn upsert(&self, session: &Session) -> Result<(), DomainError> {
        let snapshot = serde_json::to_value(session).map_err(|e| {
            DomainError::new(
                ErrorCode::PersistenceWrite,
                format!("Failed to serialize session {}: {}", session.id(), e),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO hearing_sessions (
                id, case_script_id, status, snapshot, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                status = EXCLUDED.status,
                snapshot = EXCLUDED.snapshot,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.case_script_id().as_str())
        .bind(session_status_to_str(session.status()))
        .bind(snapshot)
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::PersistenceWrite,
                format!("Failed to upsert session: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query("SELECT snapshot FROM hearing_sessions WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::StorageError,
                    format!("Failed to fetch session: {}", e),
                )
            })?;

        match row {
            Some(row) => {
                let snapshot: serde_json::Value = row.try_get("snapshot").map_err(|e| {
                    DomainError::new(
                        ErrorCode::StorageError,
                        format!("Failed to get snapshot column: {}", e),
                    )
                })?;
                let session: Session = serde_json::from_value(snapshot).map_err(|e| {
                    DomainError::new(
                        ErrorCode::CorruptSession,
                        format!("Snapshot for session {} is unreadable: {}", id, e),
                    )
                })?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &SessionId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM hearing_sessions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::StorageError,
                    format!("Failed to delete session: {}", e),
                )
            })?;

        Ok(())
    }
}

fn session_status_to_str(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::InProgress => "in_progress",
        SessionStatus::Concluded => "concluded",
    }
}
