//! Deterministic local sloot.

use async_trait::async_trait;
use frame_survivor_domain::{CharacterAttributes, LootItem, LootSlot, WalletAddress, MAX_GREATNESS};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::infrastructure::ports::{CharacterProvider, RandomPort, UpstreamError};

const WEAPONS: &[&str] = &[
    "Warhammer", "Quarterstaff", "Maul", "Mace", "Club", "Katana", "Falchion", "Scimitar",
    "Long Sword", "Short Sword", "Ghost Wand", "Grave Wand", "Bone Wand", "Wand", "Grimoire",
    "Chronicle", "Tome", "Book",
];
const CHEST: &[&str] = &[
    "Divine Robe", "Silk Robe", "Linen Robe", "Robe", "Shirt", "Demon Husk", "Dragonskin Armor",
    "Studded Leather Armor", "Hard Leather Armor", "Leather Armor", "Holy Chestplate",
    "Ornate Chestplate", "Plate Mail", "Chain Mail", "Ring Mail",
];
const HEAD: &[&str] = &[
    "Ancient Helm", "Ornate Helm", "Great Helm", "Full Helm", "Helm", "Demon Crown",
    "Dragon's Crown", "War Cap", "Leather Cap", "Cap", "Crown", "Divine Hood", "Silk Hood",
    "Linen Hood", "Hood",
];
const WAIST: &[&str] = &[
    "Ornate Belt", "War Belt", "Plated Belt", "Mesh Belt", "Heavy Belt", "Demonhide Belt",
    "Dragonskin Belt", "Studded Leather Belt", "Hard Leather Belt", "Leather Belt",
    "Brightsilk Sash", "Silk Sash", "Wool Sash", "Linen Sash", "Sash",
];
const FOOT: &[&str] = &[
    "Holy Greaves", "Ornate Greaves", "Greaves", "Chain Boots", "Heavy Boots", "Demonhide Boots",
    "Dragonskin Boots", "Studded Leather Boots", "Hard Leather Boots", "Leather Boots",
    "Divine Slippers", "Silk Slippers", "Wool Shoes", "Linen Shoes", "Shoes",
];
const HAND: &[&str] = &[
    "Holy Gauntlets", "Ornate Gauntlets", "Gauntlets", "Chain Gloves", "Heavy Gloves",
    "Demon's Hands", "Dragonskin Gloves", "Studded Leather Gloves", "Hard Leather Gloves",
    "Leather Gloves", "Divine Gloves", "Silk Gloves", "Wool Gloves", "Linen Gloves", "Gloves",
];
const NECK: &[&str] = &["Necklace", "Amulet", "Pendant"];
const RING: &[&str] = &[
    "Gold Ring", "Silver Ring", "Bronze Ring", "Platinum Ring", "Titanium Ring",
];

fn names_for(slot: LootSlot) -> &'static [&'static str] {
    match slot {
        LootSlot::Weapon => WEAPONS,
        LootSlot::Chest => CHEST,
        LootSlot::Head => HEAD,
        LootSlot::Waist => WAIST,
        LootSlot::Foot => FOOT,
        LootSlot::Hand => HAND,
        LootSlot::Neck => NECK,
        LootSlot::Ring => RING,
    }
}

/// Derives a full eight-slot sloot from any seed string, so the game runs
/// without a sloot API.
pub struct SeededSlootProvider {
    random: Arc<dyn RandomPort>,
}

impl SeededSlootProvider {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self { random }
    }

    /// Same seed, same sloot.
    pub fn derive(seed: &str) -> CharacterAttributes {
        let items = LootSlot::ALL
            .into_iter()
            .map(|slot| {
                let digest = Sha256::new()
                    .chain_update(slot.as_str().as_bytes())
                    .chain_update(seed.to_ascii_lowercase().as_bytes())
                    .finalize();
                let names = names_for(slot);
                let pick = usize::from(u16::from_be_bytes([digest[0], digest[1]])) % names.len();
                let greatness = u32::from(digest[2]) % (MAX_GREATNESS + 1);
                LootItem::new(slot, names[pick], greatness)
            })
            .collect();
        CharacterAttributes::new(seed, items)
    }
}

#[async_trait]
impl CharacterProvider for SeededSlootProvider {
    async fn fetch_character(&self, seed: &str) -> Result<CharacterAttributes, UpstreamError> {
        if seed.trim().is_empty() {
            return Err(UpstreamError::rejected("sloot", 400, "empty seed or address"));
        }
        Ok(Self::derive(seed))
    }

    fn generate_addresses(&self, count: usize) -> Vec<WalletAddress> {
        super::random_addresses(self.random.as_ref(), count)
    }
}
