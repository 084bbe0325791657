//! Fire-and-forget snapshot persistence.
//!
//! Handlers mutate the session synchronously, then hand the snapshot to a
//! background write. The caller's next transition never waits on the store;
//! a failed write leaves the live session playable and flips the sync
//! monitor to "unsynced" instead of aborting anything.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

use crate::domain::session::Session;
use crate::ports::SessionStore;

/// Shared flag tracking whether the latest snapshot write succeeded.
#[derive(Debug, Clone, Default)]
pub struct SyncMonitor {
    inner: Arc<SyncInner>,
}

#[derive(Debug, Default)]
struct SyncInner {
    unsynced: AtomicBool,
    last_error: Mutex<Option<String>>,
}

impl SyncMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while the persisted snapshot matches the live session.
    pub fn is_synced(&self) -> bool {
        !self.inner.unsynced.load(Ordering::Acquire)
    }

    /// Returns the message of the last failed write, if any.
    pub fn last_error(&self) -> Option<String> {
        self.inner.last_error.lock().expect("sync monitor poisoned").clone()
    }

    pub(crate) fn record_success(&self) {
        self.inner.unsynced.store(false, Ordering::Release);
        *self.inner.last_error.lock().expect("sync monitor poisoned") = None;
    }

    pub(crate) fn record_failure(&self, message: impl Into<String>) {
        self.inner.unsynced.store(true, Ordering::Release);
        *self.inner.last_error.lock().expect("sync monitor poisoned") = Some(message.into());
    }
}

/// Spawns a non-blocking full-snapshot write for the given session state.
///
/// Passing the previous write's handle as `after` keeps snapshots landing in
/// mutation order even though the caller never waits; an upsert is a full
/// replace, so out-of-order writes would resurrect stale state.
///
/// The returned handle is for chaining, shutdown joins, and tests; callers
/// on the gameplay path otherwise ignore it.
pub fn spawn_snapshot_write(
    after: Option<JoinHandle<()>>,
    store: Arc<dyn SessionStore>,
    session: Session,
    monitor: SyncMonitor,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Some(previous) = after {
            let _ = previous.await;
        }
        match store.upsert(&session).await {
            Ok(()) => monitor.record_success(),
            Err(err) => {
                tracing::warn!(
                    "Snapshot write failed for session {}; continuing unsynced: {}",
                    session.id(),
                    err
                );
                monitor.record_failure(err.to_string());
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::case_script::{CaseMode, CaseScript, Turn, TurnType};
    use crate::domain::foundation::{CaseScriptId, DomainError, ErrorCode, SessionId};
    use async_trait::async_trait;

    struct FailingStore;

    #[async_trait]
    impl SessionStore for FailingStore {
        async fn upsert(&self, _session: &Session) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::PersistenceWrite, "disk full"))
        }

        async fn find_by_id(&self, _id: &SessionId) -> Result<Option<Session>, DomainError> {
            Ok(None)
        }

        async fn delete(&self, _id: &SessionId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    struct OkStore;

    #[async_trait]
    impl SessionStore for OkStore {
        async fn upsert(&self, _session: &Session) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(&self, _id: &SessionId) -> Result<Option<Session>, DomainError> {
            Ok(None)
        }

        async fn delete(&self, _id: &SessionId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn session() -> Session {
        let script = CaseScript::new(
            CaseScriptId::new("case-01").unwrap(),
            "State v. Example",
            "criminal",
            "due process",
            "Judge Marden",
            "Counselor Reyes",
            "Context.",
            vec![Turn::narration(0, TurnType::OpeningNarration, "Open.").unwrap()],
            "Ruling: {verdict}",
        )
        .unwrap();
        Session::start(&script, CaseMode::Lawyer)
    }

    #[test]
    fn monitor_starts_synced() {
        let monitor = SyncMonitor::new();
        assert!(monitor.is_synced());
        assert!(monitor.last_error().is_none());
    }

    #[tokio::test]
    async fn failed_write_flags_unsynced_with_error() {
        let monitor = SyncMonitor::new();
        spawn_snapshot_write(None, Arc::new(FailingStore), session(), monitor.clone())
            .await
            .unwrap();

        assert!(!monitor.is_synced());
        assert!(monitor.last_error().unwrap().contains("disk full"));
    }

    #[tokio::test]
    async fn successful_write_clears_the_flag() {
        let monitor = SyncMonitor::new();
        monitor.record_failure("earlier failure");
        spawn_snapshot_write(None, Arc::new(OkStore), session(), monitor.clone())
            .await
            .unwrap();

        assert!(monitor.is_synced());
        assert!(monitor.last_error().is_none());
    }
}
