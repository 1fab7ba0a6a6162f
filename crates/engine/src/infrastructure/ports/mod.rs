//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Session storage (could swap SQLite -> Redis)
//! - Sloot lookups (seeded locally or via the sloot API)
//! - Combat resolution and frame rendering
//! - Clock/Random (for testing)

mod error;
mod external;
mod repos;
mod testing;

pub use error::{RepoError, UpstreamError};
pub use external::{CharacterProvider, CombatResolver, FrameRenderer};
pub use repos::SessionRepo;
pub use testing::{ClockPort, RandomPort};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockCharacterProvider, MockCombatResolver, MockFrameRenderer};
#[cfg(test)]
pub use repos::MockSessionRepo;
#[cfg(test)]
pub use testing::MockClockPort;
