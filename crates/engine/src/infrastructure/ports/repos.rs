//! Session storage port.

use async_trait::async_trait;
use frame_survivor_domain::{SessionId, SessionRecord};

use super::error::RepoError;

/// Key-value storage of session records.
///
/// Last writer wins; there is no versioning. Callers serialize their own
/// read-modify-write per session (see `SessionLocks`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepo: Send + Sync {
    async fn get(&self, id: SessionId) -> Result<Option<SessionRecord>, RepoError>;
    async fn set(&self, id: SessionId, record: &SessionRecord) -> Result<(), RepoError>;

    /// Explore counter of the stored document, read leniently so a session
    /// whose record no longer decodes can still be restarted. 0 when the
    /// document is absent or has no readable counter.
    async fn explore_count_lenient(&self, id: SessionId) -> Result<u32, RepoError>;
}
