use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Farcaster id of the player driving a session.
///
/// One session record exists per fid; the id is assigned upstream, so it is
/// only ever parsed, never generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(fid: u64) -> Result<Self, DomainError> {
        if fid == 0 {
            return Err(DomainError::validation("fid must be a positive integer"));
        }
        Ok(Self(fid))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Key under which the session record is persisted.
    pub fn storage_key(&self) -> String {
        format!("game_state:{}", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for SessionId {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionId> for u64 {
    fn from(value: SessionId) -> Self {
        value.0
    }
}
