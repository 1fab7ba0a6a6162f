//! Battle outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::WinChance;

/// Result of a resolved battle, from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Win,
    Lose,
    Draw,
}

impl BattleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Lose => "lose",
            Self::Draw => "draw",
        }
    }
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What is kept of a battle once the encounter has been pruned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattleSummary {
    pub outcome: BattleOutcome,
    pub win_chance: WinChance,
}
