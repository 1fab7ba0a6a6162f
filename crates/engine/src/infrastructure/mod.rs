//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod combat;
pub mod config;
pub mod memory_store;
pub mod ports;
pub mod renderer;
pub mod session_locks;
pub mod session_store;
pub mod sloot;
pub mod upstream;
