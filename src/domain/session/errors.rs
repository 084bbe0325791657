//! Simulation-specific error types.
//!
//! Structural errors (`CaseNotFound`, `MalformedCaseScript`, `CorruptSession`)
//! abort the attempted operation; `InvalidChoice` is a rejected no-op that
//! leaves the session untouched; `PersistenceWrite` is non-fatal and only
//! flags the session as unsynced.

use thiserror::Error;

use crate::domain::foundation::{CaseScriptId, DomainError, ErrorCode, SessionId};

/// Errors surfaced by the session controller operations.
#[derive(Debug, Clone, Error)]
pub enum SimulationError {
    /// The requested case script does not exist.
    #[error("Case script not found: {0}")]
    CaseNotFound(CaseScriptId),

    /// The case script failed structural validation.
    #[error("Malformed case script: {reason}")]
    MalformedCaseScript { reason: String },

    /// No snapshot exists for the requested session.
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    /// The choice was rejected; session state is unchanged.
    #[error("Invalid choice: {reason}")]
    InvalidChoice { reason: String },

    /// The session has concluded and is read-only.
    #[error("Session {0} has concluded and is read-only")]
    SessionConcluded(SessionId),

    /// Feedback was requested for a session that has not concluded.
    #[error("Session {0} has not concluded; no feedback is available yet")]
    SessionInProgress(SessionId),

    /// The persisted snapshot is unreadable or violates an invariant.
    #[error("Corrupt session snapshot: {reason}")]
    CorruptSession { reason: String },

    /// A snapshot write failed; the live session continues unsynced.
    #[error("Persistence write failed: {reason}")]
    PersistenceWrite { reason: String },

    /// Infrastructure failure outside the write path.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SimulationError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        SimulationError::MalformedCaseScript {
            reason: reason.into(),
        }
    }

    pub fn invalid_choice(reason: impl Into<String>) -> Self {
        SimulationError::InvalidChoice {
            reason: reason.into(),
        }
    }

    pub fn corrupt(reason: impl Into<String>) -> Self {
        SimulationError::CorruptSession {
            reason: reason.into(),
        }
    }

    pub fn persistence(reason: impl Into<String>) -> Self {
        SimulationError::PersistenceWrite {
            reason: reason.into(),
        }
    }

    /// Returns the foundation error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SimulationError::CaseNotFound(_) => ErrorCode::CaseNotFound,
            SimulationError::MalformedCaseScript { .. } => ErrorCode::MalformedCaseScript,
            SimulationError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            SimulationError::InvalidChoice { .. } => ErrorCode::InvalidChoice,
            SimulationError::SessionConcluded(_) => ErrorCode::SessionConcluded,
            SimulationError::SessionInProgress(_) => ErrorCode::ValidationFailed,
            SimulationError::CorruptSession { .. } => ErrorCode::CorruptSession,
            SimulationError::PersistenceWrite { .. } => ErrorCode::PersistenceWrite,
            SimulationError::Storage(_) => ErrorCode::StorageError,
        }
    }

    /// Returns true if the caller may keep playing the live session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SimulationError::InvalidChoice { .. } | SimulationError::PersistenceWrite { .. }
        )
    }
}

impl From<DomainError> for SimulationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::CaseNotFound => {
                // Ports report the missing id in the message; keep it.
                SimulationError::Storage(err.to_string())
            }
            ErrorCode::MalformedCaseScript => SimulationError::malformed(err.message),
            ErrorCode::CorruptSession => SimulationError::corrupt(err.message),
            ErrorCode::InvalidChoice => SimulationError::invalid_choice(err.message),
            ErrorCode::PersistenceWrite => SimulationError::persistence(err.message),
            _ => SimulationError::Storage(err.to_string()),
        }
    }
}
