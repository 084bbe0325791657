//! File-based adapters: YAML script directory and JSON session snapshots.

mod json_session_store;
mod yaml_script_source;

pub use json_session_store::JsonSessionStore;
pub use yaml_script_source::YamlScriptSource;
