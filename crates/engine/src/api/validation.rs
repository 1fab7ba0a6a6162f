//! Inbound request validation.
//!
//! Turns a raw frame packet into typed requests. Authenticity is not checked:
//! `trustedData` is ignored.

use frame_survivor_domain::{SessionId, StartingSeed};
use frame_survivor_shared::{FramePacket, UntrustedData};

/// A malformed or incomplete request; answered with 400.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// `/start` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartRequest {
    pub session_id: SessionId,
    pub starting_seed: StartingSeed,
}

/// `/explore` or `/battle` request.
///
/// Any byte-sized ordinal is accepted; ordinals the phase does not bind
/// re-render the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRequest {
    pub session_id: SessionId,
    pub button_index: u8,
}

pub fn parse_start(body: &[u8]) -> Result<StartRequest, ValidationError> {
    let data = untrusted_data(body)?;
    let session_id = session_id(&data)?;
    let raw_seed = data
        .message_hash
        .ok_or_else(|| ValidationError::new("messageHash is required"))?;
    let starting_seed = StartingSeed::parse(raw_seed)
        .map_err(|_| ValidationError::new("messageHash must be 0x-prefixed hex"))?;
    Ok(StartRequest {
        session_id,
        starting_seed,
    })
}

pub fn parse_action(body: &[u8]) -> Result<ActionRequest, ValidationError> {
    let data = untrusted_data(body)?;
    let session_id = session_id(&data)?;
    let button_index = data
        .button_index
        .ok_or_else(|| ValidationError::new("buttonIndex is required"))?;
    Ok(ActionRequest {
        session_id,
        button_index,
    })
}

fn untrusted_data(body: &[u8]) -> Result<UntrustedData, ValidationError> {
    let packet = FramePacket::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected frame packet");
        ValidationError::new("Malformed frame packet")
    })?;
    if packet.trusted_data.is_some() {
        tracing::debug!("trustedData present but not verified");
    }
    Ok(packet.untrusted_data)
}

fn session_id(data: &UntrustedData) -> Result<SessionId, ValidationError> {
    let fid = data
        .fid
        .ok_or_else(|| ValidationError::new("fid is required"))?;
    SessionId::new(fid).map_err(|_| ValidationError::new("fid must be a positive integer"))
}
