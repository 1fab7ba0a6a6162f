//! External collaborator ports.

use async_trait::async_trait;
use frame_survivor_domain::{
    BattleOutcome, CharacterAttributes, ImageRef, WalletAddress, WinChance,
};

use super::error::UpstreamError;

// =============================================================================
// Sloot provider
// =============================================================================

/// Resolves seeds and addresses to sloot and generates opponent addresses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterProvider: Send + Sync {
    /// Look up the sloot derived from a seed or an address.
    async fn fetch_character(&self, seed: &str) -> Result<CharacterAttributes, UpstreamError>;

    /// Generate `count` random opponent addresses.
    fn generate_addresses(&self, count: usize) -> Vec<WalletAddress>;
}

// =============================================================================
// Combat resolver
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CombatResolver: Send + Sync {
    /// Probability that `player` beats `opponent`.
    async fn estimate_win_chance(
        &self,
        player: &CharacterAttributes,
        opponent: &CharacterAttributes,
    ) -> Result<WinChance, UpstreamError>;

    /// Fight once and report the outcome for `player`.
    async fn simulate_battle(
        &self,
        player: &CharacterAttributes,
        opponent: &CharacterAttributes,
    ) -> Result<BattleOutcome, UpstreamError>;
}

// =============================================================================
// Frame renderer
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FrameRenderer: Send + Sync {
    /// Roster card for one opponent.
    async fn profile_image(
        &self,
        player: &CharacterAttributes,
        opponent: &CharacterAttributes,
    ) -> Result<ImageRef, UpstreamError>;

    /// Battle-entry card.
    async fn battle_image(
        &self,
        player: &CharacterAttributes,
        opponent: &CharacterAttributes,
        win_chance: WinChance,
    ) -> Result<ImageRef, UpstreamError>;

    /// Result card for a win or a loss.
    async fn result_image(
        &self,
        outcome: BattleOutcome,
        win_chance: WinChance,
    ) -> Result<ImageRef, UpstreamError>;
}
