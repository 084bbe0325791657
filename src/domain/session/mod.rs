//! Session domain module.
//!
//! Owns the hearing session lifecycle: turn consumption, choice application,
//! scoring, conclusion, and the invariant checks performed when a persisted
//! snapshot is resumed.

mod aggregate;
mod choice;
mod errors;
mod message;
mod status;
mod verdict;
mod view;

pub use aggregate::Session;
pub use choice::ChoiceRecord;
pub use errors::SimulationError;
pub use message::{Message, Speaker};
pub use status::SessionStatus;
pub use verdict::{compute_verdict, Verdict, GRANTED_THRESHOLD, PARTIALLY_GRANTED_THRESHOLD};
pub use view::SessionView;
