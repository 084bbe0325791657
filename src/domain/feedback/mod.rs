//! Feedback domain module.
//!
//! Post-hoc, read-only summarization of concluded sessions.

mod summary;

pub use summary::{FeedbackReport, ResourceKind, StudyResource};
