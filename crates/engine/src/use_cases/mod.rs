//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area of the game.

pub mod lookup;
pub mod session;

pub use lookup::LookupSloot;
pub use session::SessionUseCases;
