//! Begin: start (or restart) a session.

use frame_survivor_domain::{
    NewEncounter, Opponent, SessionId, SessionRecord, StartingSeed, ROSTER_SIZE,
};
use futures_util::future::try_join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::infrastructure::clock::format_local;
use crate::infrastructure::ports::{
    CharacterProvider, ClockPort, CombatResolver, FrameRenderer, RepoError, SessionRepo,
};
use crate::infrastructure::session_locks::SessionLocks;
use crate::infrastructure::upstream::bounded;

use super::{browsing_view, SessionError, SessionView};

/// Builds a fresh encounter for a player and persists it in one write.
///
/// Every upstream call completes before the store is touched, so a failure
/// anywhere leaves the previous record as it was.
pub struct BeginSession {
    repo: Arc<dyn SessionRepo>,
    provider: Arc<dyn CharacterProvider>,
    resolver: Arc<dyn CombatResolver>,
    renderer: Arc<dyn FrameRenderer>,
    clock: Arc<dyn ClockPort>,
    locks: SessionLocks,
    timeout: Duration,
    utc_offset_hours: i32,
}

impl BeginSession {
    pub fn new(
        repo: Arc<dyn SessionRepo>,
        provider: Arc<dyn CharacterProvider>,
        resolver: Arc<dyn CombatResolver>,
        renderer: Arc<dyn FrameRenderer>,
        clock: Arc<dyn ClockPort>,
        locks: SessionLocks,
        timeout: Duration,
        utc_offset_hours: i32,
    ) -> Self {
        Self {
            repo,
            provider,
            resolver,
            renderer,
            clock,
            locks,
            timeout,
            utc_offset_hours,
        }
    }

    pub async fn execute(
        &self,
        id: SessionId,
        starting_seed: StartingSeed,
    ) -> Result<SessionView, SessionError> {
        let started = Instant::now();

        let player = bounded(
            "fetch_character",
            self.timeout,
            self.provider.fetch_character(starting_seed.as_str()),
        )
        .await?;

        let fetch_started = Instant::now();
        let addresses = self.provider.generate_addresses(ROSTER_SIZE);
        let opponents = try_join_all(addresses.iter().map(|address| {
            bounded(
                "fetch_character",
                self.timeout,
                self.provider.fetch_character(address.as_str()),
            )
        }))
        .await?;
        tracing::info!(
            fid = %id,
            elapsed_ms = fetch_started.elapsed().as_millis() as u64,
            "Fetched opponent sloot"
        );

        let render_started = Instant::now();
        let portraits = try_join_all(opponents.iter().map(|opponent| {
            bounded(
                "profile_image",
                self.timeout,
                self.renderer.profile_image(&player, opponent),
            )
        }))
        .await?;
        tracing::info!(
            fid = %id,
            elapsed_ms = render_started.elapsed().as_millis() as u64,
            "Rendered opponent portraits"
        );

        let win_chances = try_join_all(opponents.iter().map(|opponent| {
            bounded(
                "estimate_win_chance",
                self.timeout,
                self.resolver.estimate_win_chance(&player, opponent),
            )
        }))
        .await?;

        let new = NewEncounter {
            starting_seed,
            player,
            opponents: opponents
                .into_iter()
                .zip(portraits)
                .map(|(attributes, portrait)| Opponent {
                    attributes,
                    portrait,
                })
                .collect(),
            win_chances,
        };

        let _guard = self.locks.acquire(id).await;
        let prior_explore_count = match self.repo.get(id).await {
            Ok(prior) => prior.map_or(0, |record| record.explore_count()),
            Err(RepoError::Serialization(error)) => {
                tracing::warn!(
                    fid = %id,
                    error = %error,
                    "Stored session unreadable, replacing it"
                );
                self.repo.explore_count_lenient(id).await?
            }
            Err(e) => return Err(e.into()),
        };
        let entered_at = format_local(self.clock.now(), self.utc_offset_hours);
        let record = SessionRecord::begin(new, prior_explore_count, entered_at)?;
        self.repo.set(id, &record).await?;

        tracing::info!(
            fid = %id,
            explore_count = record.explore_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Session started"
        );

        browsing_view(&record)
    }
}
