//! YAML file-based case script source.
//!
//! Reads authored scripts from a directory of YAML files. A mode-specific
//! file (`{id}.{mode}.yaml`) wins over the shared `{id}.yaml`; scripts are
//! re-read on every fetch so authors can edit between sessions.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::case_script::{CaseMode, CaseScript};
use crate::domain::foundation::{CaseScriptId, DomainError, ErrorCode};
use crate::ports::CaseScriptSource;

/// File-based implementation of CaseScriptSource.
#[derive(Debug, Clone)]
pub struct YamlScriptSource {
    base_path: PathBuf,
}

impl YamlScriptSource {
    /// Creates a source rooted at the given script directory.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn mode_file_path(&self, id: &CaseScriptId, mode: CaseMode) -> PathBuf {
        self.base_path.join(format!("{}.{}.yaml", id, mode))
    }

    fn shared_file_path(&self, id: &CaseScriptId) -> PathBuf {
        self.base_path.join(format!("{}.yaml", id))
    }

    async fn read_script(&self, path: &Path, id: &CaseScriptId) -> Result<CaseScript, DomainError> {
        let yaml = fs::read_to_string(path).await.map_err(|e| {
            DomainError::new(
                ErrorCode::StorageError,
                format!("Failed to read script file {}: {}", path.display(), e),
            )
        })?;

        let script: CaseScript = serde_yaml::from_str(&yaml).map_err(|e| {
            DomainError::new(
                ErrorCode::MalformedCaseScript,
                format!("Failed to parse script file {}: {}", path.display(), e),
            )
        })?;

        if script.id() != id {
            return Err(DomainError::new(
                ErrorCode::MalformedCaseScript,
                format!(
                    "Script file {} declares id '{}' but was requested as '{}'",
                    path.display(),
                    script.id(),
                    id
                ),
            ));
        }
        script.validate()?;
        Ok(script)
    }
}

#[async_trait]
impl CaseScriptSource for YamlScriptSource {
    async fn fetch(
        &self,
        id: &CaseScriptId,
        mode: CaseMode,
    ) -> Result<Option<CaseScript>, DomainError> {
        let mode_path = self.mode_file_path(id, mode);
        if mode_path.exists() {
            return self.read_script(&mode_path, id).await.map(Some);
        }

        let shared_path = self.shared_file_path(id);
        if shared_path.exists() {
            return self.read_script(&shared_path, id).await.map(Some);
        }

        Ok(None)
    }
}
