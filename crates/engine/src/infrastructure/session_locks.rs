//! Per-session async locks.
//!
//! Load, mutate and save for one session run under that session's mutex, so
//! two concurrent actions on the same fid cannot overwrite each other.
//! Different sessions never contend.

use dashmap::DashMap;
use frame_survivor_domain::SessionId;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone, Default)]
pub struct SessionLocks {
    locks: Arc<DashMap<SessionId, Arc<Mutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `id`.
    pub async fn acquire(&self, id: SessionId) -> SessionLockGuard {
        // The map shard guard must be released before awaiting.
        let mutex = self.locks.entry(id).or_default().value().clone();
        let guard = mutex.lock_owned().await;
        SessionLockGuard {
            locks: Arc::clone(&self.locks),
            id,
            _guard: guard,
        }
    }

    /// Number of sessions with a live lock entry.
    pub fn active(&self) -> usize {
        self.locks.len()
    }
}

/// Held for the duration of one session transition.
pub struct SessionLockGuard {
    locks: Arc<DashMap<SessionId, Arc<Mutex<()>>>>,
    id: SessionId,
    _guard: OwnedMutexGuard<()>,
}

impl Drop for SessionLockGuard {
    fn drop(&mut self) {
        // One reference in the map, one in our guard: nobody else is waiting.
        self.locks
            .remove_if(&self.id, |_, mutex| Arc::strong_count(mutex) <= 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn id(fid: u64) -> SessionId {
        SessionId::new(fid).unwrap()
    }

    #[tokio::test]
    async fn entry_is_removed_after_release() {
        let locks = SessionLocks::new();
        {
            let _guard = locks.acquire(id(1)).await;
            assert_eq!(locks.active(), 1);
        }
        assert_eq!(locks.active(), 0);
    }

    #[tokio::test]
    async fn same_session_is_serialized() {
        let locks = SessionLocks::new();
        let inside = Arc::new(AtomicU32::new(0));
        let max_seen = Arc::new(AtomicU32::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let locks = locks.clone();
                let inside = Arc::clone(&inside);
                let max_seen = Arc::clone(&max_seen);
                tokio::spawn(async move {
                    let _guard = locks.acquire(id(7)).await;
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    max_seen.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(2)).await;
                    inside.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
        assert_eq!(locks.active(), 0);
    }

    #[tokio::test]
    async fn different_sessions_do_not_contend() {
        let locks = SessionLocks::new();
        let _first = locks.acquire(id(1)).await;

        let second = tokio::time::timeout(Duration::from_millis(100), locks.acquire(id(2))).await;

        assert!(second.is_ok());
    }
}
