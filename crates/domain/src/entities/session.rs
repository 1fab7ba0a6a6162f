//! Session record and its state machine.
//!
//! A session moves through `Browsing -> InBattle -> Resolved`, restarting at
//! `Browsing` on every Begin. Transitions here are pure: they mutate one
//! in-memory record and never touch storage or external collaborators.
//!
//! Record invariants (checked on construction and on deserialization):
//! - `0 <= current_index < opponents.len()`
//! - `opponents.len() == win_chance_table.len()`

use serde::{Deserialize, Serialize};

use crate::entities::action::Direction;
use crate::entities::battle::{BattleOutcome, BattleSummary};
use crate::entities::character::CharacterAttributes;
use crate::error::DomainError;
use crate::value_objects::{ImageRef, StartingSeed, WinChance};

/// Number of opponents generated on every Begin.
pub const ROSTER_SIZE: usize = 5;

/// A roster entry: the opponent and its pre-rendered portrait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opponent {
    pub attributes: CharacterAttributes,
    pub portrait: ImageRef,
}

/// Ephemeral part of a session, dropped once a battle resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    starting_seed: StartingSeed,
    player: CharacterAttributes,
    opponents: Vec<Opponent>,
    current_index: usize,
}

impl Encounter {
    pub fn starting_seed(&self) -> &StartingSeed {
        &self.starting_seed
    }

    pub fn player(&self) -> &CharacterAttributes {
        &self.player
    }

    pub fn opponents(&self) -> &[Opponent] {
        &self.opponents
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_opponent(&self) -> Option<&Opponent> {
        self.opponents.get(self.current_index)
    }

    /// Whether a later opponent exists (drives the Next button).
    pub fn has_next(&self) -> bool {
        self.current_index + 1 < self.opponents.len()
    }

    fn step(&mut self, direction: Direction) {
        self.current_index = match direction {
            Direction::Previous => self.current_index.saturating_sub(1),
            Direction::Next => (self.current_index + 1).min(self.opponents.len().saturating_sub(1)),
        };
    }
}

/// Where a session currently is. `Unstarted` is the absence of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionState {
    Browsing { encounter: Encounter },
    InBattle { encounter: Encounter },
    Resolved { last_battle: BattleSummary },
}

/// Fieldless view of [`SessionState`] for logging and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Browsing,
    InBattle,
    Resolved,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Browsing => "browsing",
            Self::InBattle => "in_battle",
            Self::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything Begin gathered from the provider, renderer and resolver.
#[derive(Debug, Clone)]
pub struct NewEncounter {
    pub starting_seed: StartingSeed,
    pub player: CharacterAttributes,
    pub opponents: Vec<Opponent>,
    pub win_chances: Vec<WinChance>,
}

/// The player and the opponent at the current roster index.
#[derive(Debug, Clone, Copy)]
pub struct Matchup<'a> {
    pub player: &'a CharacterAttributes,
    pub opponent: &'a Opponent,
    pub win_chance: WinChance,
}

/// Persistent state of one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredSessionRecord")]
pub struct SessionRecord {
    state: SessionState,
    win_chance_table: Vec<WinChance>,
    explore_count: u32,
    battle_count: u32,
    win_count: u32,
    draw_count: u32,
    last_enter_timestamp: String,
}

impl SessionRecord {
    /// Start a fresh session.
    ///
    /// `explore_count` continues from `prior_explore_count` (0 for a first
    /// Begin); battle, win and draw counters start again at zero.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Constraint` if the roster is empty or the win
    /// chances are not aligned with it.
    pub fn begin(
        new: NewEncounter,
        prior_explore_count: u32,
        entered_at: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let record = Self {
            state: SessionState::Browsing {
                encounter: Encounter {
                    starting_seed: new.starting_seed,
                    player: new.player,
                    opponents: new.opponents,
                    current_index: 0,
                },
            },
            win_chance_table: new.win_chances,
            explore_count: prior_explore_count.saturating_add(1),
            battle_count: 0,
            win_count: 0,
            draw_count: 0,
            last_enter_timestamp: entered_at.into(),
        };
        record.check_invariants()?;
        Ok(record)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        match self.state {
            SessionState::Browsing { .. } => SessionPhase::Browsing,
            SessionState::InBattle { .. } => SessionPhase::InBattle,
            SessionState::Resolved { .. } => SessionPhase::Resolved,
        }
    }

    /// The live encounter, absent once the session has resolved.
    pub fn encounter(&self) -> Option<&Encounter> {
        match &self.state {
            SessionState::Browsing { encounter } | SessionState::InBattle { encounter } => {
                Some(encounter)
            }
            SessionState::Resolved { .. } => None,
        }
    }

    pub fn last_battle(&self) -> Option<&BattleSummary> {
        match &self.state {
            SessionState::Resolved { last_battle } => Some(last_battle),
            _ => None,
        }
    }

    pub fn current_matchup(&self) -> Option<Matchup<'_>> {
        let encounter = self.encounter()?;
        let opponent = encounter.current_opponent()?;
        let win_chance = *self.win_chance_table.get(encounter.current_index)?;
        Some(Matchup {
            player: &encounter.player,
            opponent,
            win_chance,
        })
    }

    pub fn win_chance_table(&self) -> &[WinChance] {
        &self.win_chance_table
    }

    pub fn explore_count(&self) -> u32 {
        self.explore_count
    }

    pub fn battle_count(&self) -> u32 {
        self.battle_count
    }

    pub fn win_count(&self) -> u32 {
        self.win_count
    }

    pub fn draw_count(&self) -> u32 {
        self.draw_count
    }

    pub fn last_enter_timestamp(&self) -> &str {
        &self.last_enter_timestamp
    }

    /// Move through the roster, clamping at both ends.
    ///
    /// Allowed while browsing or in battle; navigating out of a battle returns
    /// the session to browsing. Returns the new index.
    pub fn navigate(&mut self, direction: Direction) -> Result<usize, DomainError> {
        match &mut self.state {
            SessionState::Browsing { encounter } => {
                encounter.step(direction);
                Ok(encounter.current_index)
            }
            SessionState::InBattle { encounter } => {
                let mut encounter = encounter.clone();
                encounter.step(direction);
                let index = encounter.current_index;
                self.state = SessionState::Browsing { encounter };
                Ok(index)
            }
            SessionState::Resolved { .. } => Err(DomainError::invalid_transition(
                "cannot navigate a resolved session",
            )),
        }
    }

    /// Enter battle against the opponent at the current index.
    ///
    /// Only the phase changes. Engaging while already in battle is accepted
    /// and leaves the record untouched.
    pub fn engage(&mut self) -> Result<(), DomainError> {
        let encounter = match &self.state {
            SessionState::Browsing { encounter } => encounter.clone(),
            SessionState::InBattle { .. } => return Ok(()),
            SessionState::Resolved { .. } => {
                return Err(DomainError::invalid_transition(
                    "cannot engage in a resolved session",
                ))
            }
        };
        self.state = SessionState::InBattle { encounter };
        Ok(())
    }

    /// Record a battle outcome and prune the encounter.
    ///
    /// Always counts the battle; counts a win or a draw when applicable.
    pub fn resolve(&mut self, outcome: BattleOutcome) -> Result<BattleSummary, DomainError> {
        if self.phase() != SessionPhase::InBattle {
            return Err(DomainError::invalid_transition(format!(
                "cannot resolve a battle while {}",
                self.phase()
            )));
        }
        let win_chance = self
            .current_matchup()
            .map(|matchup| matchup.win_chance)
            .ok_or_else(|| DomainError::constraint("no opponent at the current index"))?;

        self.battle_count = self.battle_count.saturating_add(1);
        match outcome {
            BattleOutcome::Win => self.win_count = self.win_count.saturating_add(1),
            BattleOutcome::Draw => self.draw_count = self.draw_count.saturating_add(1),
            BattleOutcome::Lose => {}
        }

        let summary = BattleSummary {
            outcome,
            win_chance,
        };
        self.state = SessionState::Resolved {
            last_battle: summary,
        };
        Ok(summary)
    }

    fn check_invariants(&self) -> Result<(), DomainError> {
        let Some(encounter) = self.encounter() else {
            return Ok(());
        };
        if encounter.opponents.is_empty() {
            return Err(DomainError::constraint("opponent roster cannot be empty"));
        }
        if encounter.opponents.len() != self.win_chance_table.len() {
            return Err(DomainError::constraint(format!(
                "roster has {} opponents but {} win chances",
                encounter.opponents.len(),
                self.win_chance_table.len()
            )));
        }
        if encounter.current_index >= encounter.opponents.len() {
            return Err(DomainError::constraint(format!(
                "current index {} outside roster of {}",
                encounter.current_index,
                encounter.opponents.len()
            )));
        }
        Ok(())
    }
}

/// Unchecked wire shape of [`SessionRecord`].
#[derive(Deserialize)]
struct StoredSessionRecord {
    state: SessionState,
    #[serde(default)]
    win_chance_table: Vec<WinChance>,
    #[serde(default)]
    explore_count: u32,
    #[serde(default)]
    battle_count: u32,
    #[serde(default)]
    win_count: u32,
    #[serde(default)]
    draw_count: u32,
    #[serde(default)]
    last_enter_timestamp: String,
}

impl TryFrom<StoredSessionRecord> for SessionRecord {
    type Error = DomainError;

    fn try_from(stored: StoredSessionRecord) -> Result<Self, Self::Error> {
        let record = Self {
            state: stored.state,
            win_chance_table: stored.win_chance_table,
            explore_count: stored.explore_count,
            battle_count: stored.battle_count,
            win_count: stored.win_count,
            draw_count: stored.draw_count,
            last_enter_timestamp: stored.last_enter_timestamp,
        };
        record.check_invariants()?;
        Ok(record)
    }
}
