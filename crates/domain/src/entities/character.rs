//! Sloot characters: eight loot slots, each holding a named item with a
//! greatness score.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Highest greatness a loot item can roll.
pub const MAX_GREATNESS: u32 = 20;

/// Equipment slot of a loot item, in canonical loot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LootSlot {
    Weapon,
    Chest,
    Head,
    Waist,
    Foot,
    Hand,
    Neck,
    Ring,
}

impl LootSlot {
    pub const ALL: [LootSlot; 8] = [
        LootSlot::Weapon,
        LootSlot::Chest,
        LootSlot::Head,
        LootSlot::Waist,
        LootSlot::Foot,
        LootSlot::Hand,
        LootSlot::Neck,
        LootSlot::Ring,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::Chest => "chest",
            Self::Head => "head",
            Self::Waist => "waist",
            Self::Foot => "foot",
            Self::Hand => "hand",
            Self::Neck => "neck",
            Self::Ring => "ring",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| DomainError::validation(format!("Unknown loot slot: {value}")))
    }
}

impl fmt::Display for LootSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One piece of loot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootItem {
    pub slot: LootSlot,
    pub name: String,
    pub greatness: u32,
}

impl LootItem {
    pub fn new(slot: LootSlot, name: impl Into<String>, greatness: u32) -> Self {
        Self {
            slot,
            name: name.into(),
            greatness: greatness.min(MAX_GREATNESS),
        }
    }
}

/// Attributes of a player or opponent as resolved by the sloot provider.
///
/// Items are kept in canonical slot order with at most one item per slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterAttributes {
    owner: String,
    items: Vec<LootItem>,
}

impl CharacterAttributes {
    /// Build attributes for `owner` (the seed or address they were derived
    /// from). Later items replace earlier ones in the same slot.
    pub fn new(owner: impl Into<String>, items: Vec<LootItem>) -> Self {
        let mut by_slot: Vec<LootItem> = Vec::with_capacity(items.len());
        for item in items {
            match by_slot.iter_mut().find(|existing| existing.slot == item.slot) {
                Some(existing) => *existing = item,
                None => by_slot.push(item),
            }
        }
        by_slot.sort_by_key(|item| item.slot);

        Self {
            owner: owner.into(),
            items: by_slot,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn items(&self) -> &[LootItem] {
        &self.items
    }

    pub fn item(&self, slot: LootSlot) -> Option<&LootItem> {
        self.items.iter().find(|item| item.slot == slot)
    }

    pub fn total_greatness(&self) -> u32 {
        self.items.iter().map(|item| item.greatness).sum()
    }

    /// Short display label, e.g. `0xd2b1…2974`.
    pub fn short_owner(&self) -> String {
        let len = self.owner.len();
        if len <= 12 {
            return self.owner.clone();
        }
        match (self.owner.get(..6), self.owner.get(len - 4..)) {
            (Some(head), Some(tail)) => format!("{head}…{tail}"),
            _ => self.owner.clone(),
        }
    }
}
