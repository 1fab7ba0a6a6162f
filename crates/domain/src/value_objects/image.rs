//! Displayable image references handed to the frame client.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An image the frame client can load: an `https://` URL or an inline
/// `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Build a base64 `data:` URI.
    pub fn data_uri(media_type: &str, base64_payload: &str) -> Self {
        Self(format!("data:{media_type};base64,{base64_payload}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_inline(&self) -> bool {
        self.0.starts_with("data:")
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}
