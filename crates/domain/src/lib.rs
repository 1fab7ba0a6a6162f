//! Frame Survivor domain: session records, sloot characters and the pure
//! state transitions between browsing, battle and resolution.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{
    BattleAction, BattleOutcome, BattleSummary, CharacterAttributes, Direction, Encounter,
    ExploreAction, LootItem, LootSlot, Matchup, NewEncounter, Opponent, SessionPhase,
    SessionRecord, SessionState, MAX_GREATNESS, ROSTER_SIZE,
};
pub use error::DomainError;
pub use ids::SessionId;
pub use value_objects::{ImageRef, StartingSeed, WalletAddress, WinChance};
