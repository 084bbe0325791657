//! Dialogue typist pacing configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Pacing of the dialogue typist effect
#[derive(Debug, Clone, Deserialize)]
pub struct TypistConfig {
    /// Maximum characters revealed per chunk
    #[serde(default = "default_chunk_limit")]
    pub chunk_limit: usize,

    /// Delay before each chunk, in milliseconds
    #[serde(default = "default_chunk_delay_ms")]
    pub chunk_delay_ms: u64,
}

impl TypistConfig {
    /// Get the per-chunk delay as a Duration
    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }

    /// Validate typist configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.chunk_limit == 0 {
            return Err(ValidationError::InvalidChunkLimit);
        }
        Ok(())
    }
}

impl Default for TypistConfig {
    fn default() -> Self {
        Self {
            chunk_limit: default_chunk_limit(),
            chunk_delay_ms: default_chunk_delay_ms(),
        }
    }
}

fn default_chunk_limit() -> usize {
    200
}

fn default_chunk_delay_ms() -> u64 {
    400
}
