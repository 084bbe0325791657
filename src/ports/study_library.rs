//! Study-content library port.
//!
//! Read-only lookup of related study material. Consumed solely by the
//! feedback aggregator; never on the gameplay hot path.

use async_trait::async_trait;

use crate::domain::feedback::StudyResource;
use crate::domain::foundation::DomainError;

/// Port for querying the study-content library.
#[async_trait]
pub trait StudyLibrary: Send + Sync {
    /// Returns suggested readings and media for a legal area and theme.
    ///
    /// An empty result is valid; feedback degrades to the script's own
    /// suggestion lists.
    ///
    /// # Errors
    ///
    /// - `StorageError` on infrastructure failure
    async fn recommend(&self, area: &str, theme: &str) -> Result<Vec<StudyResource>, DomainError>;
}
