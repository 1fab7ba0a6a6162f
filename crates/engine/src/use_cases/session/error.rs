use frame_survivor_domain::{DomainError, SessionId};

use crate::infrastructure::ports::{RepoError, UpstreamError};

/// Errors from session transitions.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Navigate, Engage or Resolve against a session that was never started.
    #[error("Session {0} not found")]
    SessionNotFound(SessionId),
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
