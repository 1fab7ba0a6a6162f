//! Battle screen actions: Resolve.

use frame_survivor_domain::{BattleAction, DomainError, SessionId, SessionPhase};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::infrastructure::ports::{CombatResolver, SessionRepo};
use crate::infrastructure::session_locks::SessionLocks;
use crate::infrastructure::upstream::bounded;

use super::{SessionError, SessionView, ViewBuilder};

pub struct ResolveBattle {
    repo: Arc<dyn SessionRepo>,
    resolver: Arc<dyn CombatResolver>,
    views: Arc<ViewBuilder>,
    locks: SessionLocks,
    timeout: Duration,
}

impl ResolveBattle {
    pub fn new(
        repo: Arc<dyn SessionRepo>,
        resolver: Arc<dyn CombatResolver>,
        views: Arc<ViewBuilder>,
        locks: SessionLocks,
        timeout: Duration,
    ) -> Self {
        Self {
            repo,
            resolver,
            views,
            locks,
            timeout,
        }
    }

    pub async fn execute(
        &self,
        id: SessionId,
        button_index: u8,
    ) -> Result<SessionView, SessionError> {
        let started = Instant::now();
        let _guard = self.locks.acquire(id).await;
        let mut record = self
            .repo
            .get(id)
            .await?
            .ok_or(SessionError::SessionNotFound(id))?;

        if record.phase() != SessionPhase::InBattle {
            tracing::debug!(
                fid = %id,
                button_index,
                phase = %record.phase(),
                "Battle action outside battle, showing current view"
            );
            return self.views.current(&record).await;
        }

        match BattleAction::from_button(button_index) {
            BattleAction::Fight => {}
            BattleAction::Flee | BattleAction::Unrecognized(_) => {
                tracing::debug!(fid = %id, button_index, "Battle button has no effect");
                return self.views.battle_entry(&record).await;
            }
        }

        let outcome = {
            let matchup = record
                .current_matchup()
                .ok_or_else(|| DomainError::constraint("no opponent at the current index"))?;
            bounded(
                "simulate_battle",
                self.timeout,
                self.resolver
                    .simulate_battle(matchup.player, &matchup.opponent.attributes),
            )
            .await?
        };

        let summary = record.resolve(outcome)?;
        let view = self.views.result(summary).await?;
        self.repo.set(id, &record).await?;

        tracing::info!(
            fid = %id,
            %outcome,
            battle_count = record.battle_count(),
            win_count = record.win_count(),
            draw_count = record.draw_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Battle resolved"
        );
        Ok(view)
    }
}
