//! In-memory study-content library.
//!
//! Serves a fixed catalog keyed by legal area. Theme narrows the result when
//! any entry mentions it; otherwise the whole area catalog is returned.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::feedback::StudyResource;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::StudyLibrary;

/// In-memory implementation of StudyLibrary.
#[derive(Debug, Default)]
pub struct InMemoryStudyLibrary {
    catalog: Mutex<HashMap<String, Vec<(String, StudyResource)>>>,
}

impl InMemoryStudyLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource for an area, tagged with a theme.
    pub fn insert(&self, area: &str, theme: &str, resource: StudyResource) {
        self.catalog
            .lock()
            .expect("study library lock poisoned")
            .entry(area.to_string())
            .or_default()
            .push((theme.to_string(), resource));
    }
}

#[async_trait]
impl StudyLibrary for InMemoryStudyLibrary {
    async fn recommend(&self, area: &str, theme: &str) -> Result<Vec<StudyResource>, DomainError> {
        let catalog = self
            .catalog
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::StorageError, "Study library lock poisoned"))?;

        let Some(entries) = catalog.get(area) else {
            return Ok(Vec::new());
        };

        let themed: Vec<StudyResource> = entries
            .iter()
            .filter(|(entry_theme, _)| entry_theme == theme)
            .map(|(_, resource)| resource.clone())
            .collect();

        if themed.is_empty() {
            Ok(entries.iter().map(|(_, r)| r.clone()).collect())
        } else {
            Ok(themed)
        }
    }
}
