//! Dialogue typist - paced reveal of committed transcript messages.
//!
//! Purely presentational. Chunk planning is a pure function; execution is a
//! single cancellable timer task per session that emits events and performs
//! no I/O.

mod chunker;
mod scheduler;

pub use chunker::{plan_chunks, DEFAULT_CHUNK_LIMIT};
pub use scheduler::{DialogueTypist, TypingEvent, TypistConfig};
