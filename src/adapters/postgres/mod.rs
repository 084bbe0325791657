//! PostgreSQL adapters.

mod session_store;

pub use session_store::PostgresSessionStore;
