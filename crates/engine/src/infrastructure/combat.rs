//! Stat-based combat resolution.
//!
//! Power is the sum of `greatness + 1` over all items, so an empty slot still
//! counts for nothing and a greatness-0 item counts for one.

use async_trait::async_trait;
use frame_survivor_domain::{BattleOutcome, CharacterAttributes, WinChance};
use std::sync::Arc;

use crate::infrastructure::ports::{CombatResolver, RandomPort, UpstreamError};

/// Bounds on the estimated win chance; no fight is a sure thing.
const MIN_WIN_CHANCE: f64 = 0.05;
const MAX_WIN_CHANCE: f64 = 0.95;

/// Share of rolls that end in a draw.
const DRAW_BAND: f64 = 0.05;

pub struct StatCombatResolver {
    random: Arc<dyn RandomPort>,
}

impl StatCombatResolver {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self { random }
    }

    fn power(attributes: &CharacterAttributes) -> f64 {
        attributes
            .items()
            .iter()
            .map(|item| f64::from(item.greatness) + 1.0)
            .sum()
    }

    pub fn win_chance(player: &CharacterAttributes, opponent: &CharacterAttributes) -> WinChance {
        let own = Self::power(player);
        let theirs = Self::power(opponent);
        if own + theirs <= 0.0 {
            return WinChance::new(0.5);
        }
        WinChance::new((own / (own + theirs)).clamp(MIN_WIN_CHANCE, MAX_WIN_CHANCE))
    }

    /// Map one uniform roll in `[0, 1)` to an outcome.
    fn outcome_for_roll(roll: f64, chance: WinChance) -> BattleOutcome {
        if roll < DRAW_BAND {
            return BattleOutcome::Draw;
        }
        let scaled = (roll - DRAW_BAND) / (1.0 - DRAW_BAND);
        if scaled < chance.value() {
            BattleOutcome::Win
        } else {
            BattleOutcome::Lose
        }
    }
}

#[async_trait]
impl CombatResolver for StatCombatResolver {
    async fn estimate_win_chance(
        &self,
        player: &CharacterAttributes,
        opponent: &CharacterAttributes,
    ) -> Result<WinChance, UpstreamError> {
        Ok(Self::win_chance(player, opponent))
    }

    async fn simulate_battle(
        &self,
        player: &CharacterAttributes,
        opponent: &CharacterAttributes,
    ) -> Result<BattleOutcome, UpstreamError> {
        let chance = Self::win_chance(player, opponent);
        let roll = self.random.gen_unit();
        let outcome = Self::outcome_for_roll(roll, chance);
        tracing::debug!(roll, win_chance = chance.value(), %outcome, "Battle simulated");
        Ok(outcome)
    }
}
