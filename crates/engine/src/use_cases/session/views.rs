//! Screens produced by session transitions.

use frame_survivor_domain::{
    BattleOutcome, BattleSummary, DomainError, ImageRef, SessionRecord, SessionState,
};
use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::ports::FrameRenderer;
use crate::infrastructure::upstream::bounded;

use super::SessionError;

/// What the player should see next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView {
    /// Roster card of the current opponent.
    Browsing { portrait: ImageRef, has_next: bool },
    /// About to fight the current opponent.
    BattleEntry { image: ImageRef },
    /// Outcome of the last battle.
    Resolved {
        outcome: BattleOutcome,
        image: ImageRef,
    },
}

/// Browsing view from the stored portrait; never calls the renderer.
pub fn browsing_view(record: &SessionRecord) -> Result<SessionView, SessionError> {
    let encounter = record
        .encounter()
        .ok_or_else(|| DomainError::invalid_transition("no encounter to browse"))?;
    let opponent = encounter
        .current_opponent()
        .ok_or_else(|| DomainError::constraint("no opponent at the current index"))?;
    Ok(SessionView::Browsing {
        portrait: opponent.portrait.clone(),
        has_next: encounter.has_next(),
    })
}

/// Builds [`SessionView`]s from session records.
pub struct ViewBuilder {
    renderer: Arc<dyn FrameRenderer>,
    draw_card: ImageRef,
    timeout: Duration,
}

impl ViewBuilder {
    pub fn new(renderer: Arc<dyn FrameRenderer>, draw_card: ImageRef, timeout: Duration) -> Self {
        Self {
            renderer,
            draw_card,
            timeout,
        }
    }

    /// The view matching the record's phase, with no state change.
    pub async fn current(&self, record: &SessionRecord) -> Result<SessionView, SessionError> {
        match record.state() {
            SessionState::Browsing { .. } => browsing_view(record),
            SessionState::InBattle { .. } => self.battle_entry(record).await,
            SessionState::Resolved { last_battle } => self.result(*last_battle).await,
        }
    }

    /// Battle-entry card rendered from the current matchup.
    pub async fn battle_entry(&self, record: &SessionRecord) -> Result<SessionView, SessionError> {
        let matchup = record
            .current_matchup()
            .ok_or_else(|| DomainError::invalid_transition("no opponent to battle"))?;
        let image = bounded(
            "battle_image",
            self.timeout,
            self.renderer.battle_image(
                matchup.player,
                &matchup.opponent.attributes,
                matchup.win_chance,
            ),
        )
        .await?;
        Ok(SessionView::BattleEntry { image })
    }

    /// Result card. Draws use the pre-rendered draw card.
    pub async fn result(&self, summary: BattleSummary) -> Result<SessionView, SessionError> {
        let image = match summary.outcome {
            BattleOutcome::Draw => self.draw_card.clone(),
            outcome => {
                bounded(
                    "result_image",
                    self.timeout,
                    self.renderer.result_image(outcome, summary.win_chance),
                )
                .await?
            }
        };
        Ok(SessionView::Resolved {
            outcome: summary.outcome,
            image,
        })
    }
}
