//! Adapters - concrete implementations of the ports.
//!
//! - `memory` - in-process maps for tests and ephemeral demos
//! - `fs` - YAML script directory and JSON snapshot files
//! - `postgres` - JSONB snapshot store backed by sqlx

pub mod fs;
pub mod memory;
pub mod postgres;
