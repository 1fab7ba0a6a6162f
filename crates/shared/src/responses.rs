//! JSON bodies returned by the sloot lookup endpoint.

use serde::{Deserialize, Serialize};

use frame_survivor_domain::CharacterAttributes;

/// Error payload: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// One loot item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlootItemData {
    pub slot: String,
    pub name: String,
    pub greatness: u32,
}

/// Sloot resolved for an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlootData {
    pub address: String,
    pub items: Vec<SlootItemData>,
    pub total_greatness: u32,
}

impl From<&CharacterAttributes> for SlootData {
    fn from(attributes: &CharacterAttributes) -> Self {
        Self {
            address: attributes.owner().to_string(),
            items: attributes
                .items()
                .iter()
                .map(|item| SlootItemData {
                    slot: item.slot.as_str().to_string(),
                    name: item.name.clone(),
                    greatness: item.greatness,
                })
                .collect(),
            total_greatness: attributes.total_greatness(),
        }
    }
}
