//! Cancellable reveal scheduler for the dialogue typist.
//!
//! One scheduler per session, at most one active reveal at a time. The
//! scheduler only emits [`TypingEvent`]s over a channel; it never touches
//! session state, so cancelling mid-reveal cannot corrupt or truncate the
//! message log (messages are committed whole before the typist starts).

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::chunker::{plan_chunks, DEFAULT_CHUNK_LIMIT};

/// Pacing configuration for the typist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypistConfig {
    /// Maximum chunk length in characters.
    pub chunk_limit: usize,
    /// Fixed delay before each chunk is revealed.
    pub chunk_delay: Duration,
}

impl Default for TypistConfig {
    fn default() -> Self {
        Self {
            chunk_limit: DEFAULT_CHUNK_LIMIT,
            chunk_delay: Duration::from_millis(600),
        }
    }
}

/// Presentation events emitted while a message is revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypingEvent {
    /// The typing indicator should be shown; a chunk is on its way.
    Typing,
    /// The next chunk is revealed.
    Chunk(String),
    /// The whole message has been revealed.
    Finished,
}

/// Paces the display of already-committed messages for one session.
#[derive(Debug)]
pub struct DialogueTypist {
    config: TypistConfig,
    active: Option<JoinHandle<()>>,
}

impl DialogueTypist {
    /// Creates a typist with the given pacing.
    pub fn new(config: TypistConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    /// Begins revealing `text`, cancelling any reveal still in flight.
    ///
    /// Returns the event stream for the UI to consume. Dropping the receiver
    /// stops the reveal at the next send.
    pub fn begin(&mut self, text: &str) -> mpsc::Receiver<TypingEvent> {
        self.cancel();

        let chunks = plan_chunks(text, self.config.chunk_limit);
        let delay = self.config.chunk_delay;
        // Sized so the reveal task never blocks on a slow consumer.
        let capacity = (chunks.len() * 2 + 1).max(1);
        let (tx, rx) = mpsc::channel(capacity);

        let handle = tokio::spawn(async move {
            for chunk in chunks {
                if tx.send(TypingEvent::Typing).await.is_err() {
                    return;
                }
                tokio::time::sleep(delay).await;
                if tx.send(TypingEvent::Chunk(chunk)).await.is_err() {
                    return;
                }
            }
            let _ = tx.send(TypingEvent::Finished).await;
        });
        self.active = Some(handle);
        rx
    }

    /// Cancels the active reveal, if any. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.abort();
        }
    }

    /// Returns true while a reveal is still running.
    pub fn is_revealing(&self) -> bool {
        self.active
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for DialogueTypist {
    fn drop(&mut self) {
        self.cancel();
    }
}
