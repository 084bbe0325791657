//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `case_script` - Authored hearing definitions and load-time validation
//! - `session` - Hearing session lifecycle, scoring, and verdicts
//! - `typist` - Paced reveal of transcript messages (presentation only)
//! - `feedback` - Read-only summarization of concluded sessions

pub mod case_script;
pub mod feedback;
pub mod foundation;
pub mod session;
pub mod typist;
