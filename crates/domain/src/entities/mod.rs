//! Domain entities and the session state machine.

mod action;
mod battle;
mod character;
mod session;

pub use action::{BattleAction, Direction, ExploreAction};
pub use battle::{BattleOutcome, BattleSummary};
pub use character::{CharacterAttributes, LootItem, LootSlot, MAX_GREATNESS};
pub use session::{
    Encounter, Matchup, NewEncounter, Opponent, SessionPhase, SessionRecord, SessionState,
    ROSTER_SIZE,
};
