//! Frame Survivor Protocol - wire types for the Farcaster frame surface
//!
//! This crate contains everything that crosses the HTTP boundary:
//! - Inbound frame action packets (`untrustedData` / `trustedData`)
//! - Outbound frame documents (`fc:frame` meta tags)
//! - JSON DTOs for the sloot lookup endpoint
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json, thiserror and tracing
//! 2. **No business logic** - Pure data types, parsing and rendering

pub mod frame;
pub mod packet;
pub mod responses;

pub use frame::{escape_attribute, FrameButton, FrameDocument, MAX_FRAME_BUTTONS};
pub use packet::{CastId, FramePacket, PacketError, TrustedData, UntrustedData};
pub use responses::{ErrorBody, SlootData, SlootItemData};
