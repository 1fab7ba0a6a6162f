//! Inbound frame action packets.
//!
//! Every frame button press arrives as
//!
//! ```json
//! {
//!   "untrustedData": { "fid": 2, "messageHash": "0xd2b1…", "buttonIndex": 2, ... },
//!   "trustedData": { "messageBytes": "d2b1…" }
//! }
//! ```
//!
//! Only `untrustedData` is read. `trustedData` is carried for completeness and
//! is never verified.

use serde::{Deserialize, Serialize};

/// Errors raised while decoding a packet body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PacketError {
    #[error("Malformed frame packet: {0}")]
    Malformed(String),
}

/// A frame action as posted by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FramePacket {
    pub untrusted_data: UntrustedData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_data: Option<TrustedData>,
}

impl FramePacket {
    /// Decode a packet from a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, PacketError> {
        serde_json::from_slice(body).map_err(|e| PacketError::Malformed(e.to_string()))
    }
}

/// Client-asserted action fields. Every field is optional on the wire; the
/// engine decides which ones an endpoint requires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UntrustedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fid: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_index: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast_id: Option<CastId>,
}

/// Cast the frame was embedded in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastId {
    pub fid: u64,
    pub hash: String,
}

/// Signed message bytes, unverified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedData {
    pub message_bytes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_packet() {
        let body = br#"{
            "untrustedData": {
                "fid": 2,
                "url": "https://fcpolls.com/polls/1",
                "messageHash": "0xd2b1ddc6c88e865a33cb1a565e0058d757042974",
                "timestamp": 1706243218,
                "network": 1,
                "buttonIndex": 2,
                "inputText": "hello world",
                "castId": { "fid": 226, "hash": "0xa48dd46161d8e57725f5e26e34ec19c13ff7f3b9" }
            },
            "trustedData": { "messageBytes": "d2b1ddc6c88e865a33cb1a565e0058d757042974" }
        }"#;

        let packet = FramePacket::from_slice(body).unwrap();

        assert_eq!(packet.untrusted_data.fid, Some(2));
        assert_eq!(packet.untrusted_data.button_index, Some(2));
        assert_eq!(packet.untrusted_data.cast_id.map(|c| c.fid), Some(226));
        assert!(packet.trusted_data.is_some());
    }

    #[test]
    fn missing_fields_are_none() {
        let packet = FramePacket::from_slice(br#"{"untrustedData":{}}"#).unwrap();
        assert_eq!(packet.untrusted_data, UntrustedData::default());
    }

    #[test]
    fn rejects_missing_envelope_and_wrong_types() {
        assert!(FramePacket::from_slice(br#"{"fid": 2}"#).is_err());
        assert!(FramePacket::from_slice(br#"{"untrustedData":{"fid":"two"}}"#).is_err());
        assert!(FramePacket::from_slice(b"not json").is_err());
    }
}
