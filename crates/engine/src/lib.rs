//! Frame Survivor engine library.
//!
//! This crate contains all server-side code for the Frame Survivor game.
//!
//! ## Structure
//!
//! - `use_cases/` - Session transitions and the sloot lookup
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points and frame documents
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Shared builders for unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
