//! In-memory adapters for tests and ephemeral demos.

mod script_source;
mod session_store;
mod study_library;

pub use script_source::InMemoryScriptSource;
pub use session_store::InMemorySessionStore;
pub use study_library::InMemoryStudyLibrary;
