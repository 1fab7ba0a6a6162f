//! API layer - HTTP entry points for frame actions.

pub mod frames;
pub mod http;
pub mod validation;

pub use frames::FrameResponder;
