//! Common test builders.
//!
//! `fresh_record()` is a five-opponent session at index 0 where opponent `i`
//! is owned by `opponent-{i}`, has portrait `https://img.test/{i}.png` and a
//! win chance of `0.1 * (i + 1)`.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use std::time::Duration;

use frame_survivor_domain::{
    CharacterAttributes, ImageRef, LootItem, LootSlot, NewEncounter, Opponent, SessionId,
    SessionRecord, StartingSeed, WinChance, ROSTER_SIZE,
};

use crate::infrastructure::ports::FrameRenderer;
use crate::use_cases::session::ViewBuilder;

pub fn session_id(fid: u64) -> SessionId {
    SessionId::new(fid).expect("test fid must be positive")
}

pub fn seed() -> StartingSeed {
    StartingSeed::parse("0xa48dd46161d8e57725f5e26e34ec19c13ff7f3b9").expect("valid seed")
}

/// A character with a single weapon of the given greatness.
pub fn character(owner: &str, greatness: u32) -> CharacterAttributes {
    CharacterAttributes::new(
        owner,
        vec![LootItem::new(LootSlot::Weapon, "Katana", greatness)],
    )
}

/// 2024-02-01 20:30:05 UTC, which is 04:30:05 the next day at +08:00.
pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 1, 20, 30, 5)
        .single()
        .expect("valid instant")
}

pub fn new_encounter() -> NewEncounter {
    NewEncounter {
        starting_seed: seed(),
        player: character("player", 10),
        opponents: (0..ROSTER_SIZE)
            .map(|i| Opponent {
                attributes: character(&format!("opponent-{i}"), i as u32),
                portrait: ImageRef::new(format!("https://img.test/{i}.png")),
            })
            .collect(),
        win_chances: (0..ROSTER_SIZE)
            .map(|i| WinChance::new(0.1 * (i as f64 + 1.0)))
            .collect(),
    }
}

pub fn fresh_record() -> SessionRecord {
    SessionRecord::begin(new_encounter(), 0, "2024/02/02 04:30:05").expect("valid record")
}

pub fn draw_card() -> ImageRef {
    ImageRef::new("data:image/png;base64,ZHJhdw==")
}

/// View builder around `renderer` using [`draw_card`].
pub fn views_with(renderer: impl FrameRenderer + 'static) -> Arc<ViewBuilder> {
    Arc::new(ViewBuilder::new(
        Arc::new(renderer),
        draw_card(),
        Duration::from_secs(1),
    ))
}
