//! In-memory case script source.
//!
//! Backing store for tests and demos. Scripts are keyed by id and mode so a
//! case authored for both benches can live side by side.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::case_script::{CaseMode, CaseScript};
use crate::domain::foundation::{CaseScriptId, DomainError, ErrorCode};
use crate::ports::CaseScriptSource;

/// In-memory implementation of CaseScriptSource.
#[derive(Debug, Default)]
pub struct InMemoryScriptSource {
    scripts: Mutex<HashMap<(CaseScriptId, CaseMode), CaseScript>>,
}

impl InMemoryScriptSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a script under the given mode, replacing any previous one.
    pub fn insert(&self, mode: CaseMode, script: CaseScript) {
        self.scripts
            .lock()
            .expect("script source lock poisoned")
            .insert((script.id().clone(), mode), script);
    }
}

#[async_trait]
impl CaseScriptSource for InMemoryScriptSource {
    async fn fetch(
        &self,
        id: &CaseScriptId,
        mode: CaseMode,
    ) -> Result<Option<CaseScript>, DomainError> {
        let scripts = self
            .scripts
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::StorageError, "Script source lock poisoned"))?;
        Ok(scripts.get(&(id.clone(), mode)).cloned())
    }
}
