//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! simulation domain and the outside world. Adapters implement these ports.
//!
//! - `CaseScriptSource` - read-only fetch of authored hearing scripts
//! - `SessionStore` - full-snapshot session persistence
//! - `StudyLibrary` - read-only study-content recommendations

mod case_script_source;
mod session_store;
mod study_library;

pub use case_script_source::CaseScriptSource;
pub use session_store::SessionStore;
pub use study_library::StudyLibrary;
