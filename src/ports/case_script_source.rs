//! Case script source port.
//!
//! Read-only fetch of authored scripts by id and mode. Sources hand back
//! scripts as parsed; structural validation happens in one place, the
//! session handlers, so "is this case playable" has a single answer.

use async_trait::async_trait;

use crate::domain::case_script::{CaseMode, CaseScript};
use crate::domain::foundation::{CaseScriptId, DomainError};

/// Port for fetching authored case scripts.
#[async_trait]
pub trait CaseScriptSource: Send + Sync {
    /// Fetches the script variant for the given id and mode.
    ///
    /// Returns `None` if no such script exists.
    ///
    /// # Errors
    ///
    /// - `StorageError` on infrastructure failure
    async fn fetch(
        &self,
        id: &CaseScriptId,
        mode: CaseMode,
    ) -> Result<Option<CaseScript>, DomainError>;
}
