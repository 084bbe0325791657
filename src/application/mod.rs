//! Application layer - orchestration over the domain and ports.
//!
//! The [`SessionController`] drives live gameplay; [`GetFeedbackHandler`]
//! answers the post-hoc feedback query from persisted snapshots. Persistence
//! is fire-and-forget, tracked by the [`SyncMonitor`].

mod controller;
mod feedback;
mod sync;

pub use controller::SessionController;
pub use feedback::GetFeedbackHandler;
pub use sync::{spawn_snapshot_write, SyncMonitor};
