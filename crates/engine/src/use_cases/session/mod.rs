//! Session use cases.
//!
//! Begin, Navigate, Engage and Resolve. Each transition loads the record
//! under the session lock, applies the pure domain transition, makes every
//! upstream call it needs and then saves exactly once.

use std::sync::Arc;

mod battle;
mod begin;
mod error;
mod explore;
mod views;

pub use battle::ResolveBattle;
pub use begin::BeginSession;
pub use error::SessionError;
pub use explore::ExploreSession;
pub use views::{browsing_view, SessionView, ViewBuilder};

/// Container for session use cases.
pub struct SessionUseCases {
    pub begin: Arc<BeginSession>,
    pub explore: Arc<ExploreSession>,
    pub battle: Arc<ResolveBattle>,
}

impl SessionUseCases {
    pub fn new(
        begin: Arc<BeginSession>,
        explore: Arc<ExploreSession>,
        battle: Arc<ResolveBattle>,
    ) -> Self {
        Self {
            begin,
            explore,
            battle,
        }
    }
}
