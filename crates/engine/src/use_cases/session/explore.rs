//! Explore screen actions: Navigate and Engage.

use frame_survivor_domain::{ExploreAction, SessionId, SessionPhase};
use std::sync::Arc;

use crate::infrastructure::ports::SessionRepo;
use crate::infrastructure::session_locks::SessionLocks;

use super::{browsing_view, SessionError, SessionView, ViewBuilder};

pub struct ExploreSession {
    repo: Arc<dyn SessionRepo>,
    views: Arc<ViewBuilder>,
    locks: SessionLocks,
}

impl ExploreSession {
    pub fn new(repo: Arc<dyn SessionRepo>, views: Arc<ViewBuilder>, locks: SessionLocks) -> Self {
        Self { repo, views, locks }
    }

    pub async fn execute(
        &self,
        id: SessionId,
        button_index: u8,
    ) -> Result<SessionView, SessionError> {
        let _guard = self.locks.acquire(id).await;
        let mut record = self
            .repo
            .get(id)
            .await?
            .ok_or(SessionError::SessionNotFound(id))?;

        if record.phase() == SessionPhase::Resolved {
            tracing::debug!(fid = %id, button_index, "Explore after resolution, showing result");
            return self.views.current(&record).await;
        }

        match ExploreAction::from_button(button_index) {
            ExploreAction::Navigate(direction) => {
                let index = record.navigate(direction)?;
                self.repo.set(id, &record).await?;
                tracing::info!(fid = %id, ?direction, index, "Opponent index updated");
                browsing_view(&record)
            }
            ExploreAction::Engage => {
                let was_browsing = record.phase() == SessionPhase::Browsing;
                record.engage()?;
                // Render before saving so a renderer failure leaves the record untouched.
                let view = self.views.battle_entry(&record).await?;
                if was_browsing {
                    self.repo.set(id, &record).await?;
                }
                tracing::info!(
                    fid = %id,
                    index = record.encounter().map(|e| e.current_index()),
                    "Entered battle"
                );
                Ok(view)
            }
            ExploreAction::Unrecognized(other) => {
                tracing::debug!(fid = %id, button_index = other, "Unrecognized explore button");
                self.views.current(&record).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory_store::InMemorySessionRepo;
    use crate::infrastructure::ports::{MockFrameRenderer, MockSessionRepo, UpstreamError};
    use crate::test_fixtures::{fresh_record, session_id, views_with};
    use frame_survivor_domain::{BattleOutcome, Direction, ImageRef, SessionRecord};

    fn stored(record: SessionRecord) -> MockSessionRepo {
        let mut repo = MockSessionRepo::new();
        repo.expect_get().returning(move |_| Ok(Some(record.clone())));
        repo
    }

    fn battle_renderer() -> MockFrameRenderer {
        let mut renderer = MockFrameRenderer::new();
        renderer
            .expect_battle_image()
            .returning(|_, opponent, chance| {
                Ok(ImageRef::new(format!("battle:{}:{}", opponent.owner(), chance.percent())))
            });
        renderer
    }

    fn explore(repo: impl SessionRepo + 'static, renderer: MockFrameRenderer) -> ExploreSession {
        ExploreSession::new(Arc::new(repo), views_with(renderer), SessionLocks::new())
    }

    #[tokio::test]
    async fn missing_session_is_not_found_and_writes_nothing() {
        let mut repo = MockSessionRepo::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_set().times(0);

        let result = explore(repo, MockFrameRenderer::new())
            .execute(session_id(1), 3)
            .await;

        assert!(matches!(result, Err(SessionError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn previous_at_start_stays_on_first_opponent() {
        let mut repo = stored(fresh_record());
        repo.expect_set()
            .withf(|_, record| record.encounter().map(|e| e.current_index()) == Some(0))
            .times(1)
            .returning(|_, _| Ok(()));

        let view = explore(repo, MockFrameRenderer::new())
            .execute(session_id(1), 1)
            .await
            .unwrap();

        assert_eq!(
            view,
            SessionView::Browsing {
                portrait: ImageRef::new("https://img.test/0.png"),
                has_next: true,
            }
        );
    }

    #[tokio::test]
    async fn next_four_times_reaches_last_opponent_and_hides_next() {
        let repo = InMemorySessionRepo::new();
        repo.set(session_id(1), &fresh_record()).await.unwrap();
        let explore = explore(repo, MockFrameRenderer::new());

        let mut view = None;
        for _ in 0..4 {
            view = Some(explore.execute(session_id(1), 3).await.unwrap());
        }
        assert_eq!(
            view,
            Some(SessionView::Browsing {
                portrait: ImageRef::new("https://img.test/4.png"),
                has_next: false,
            })
        );

        // Clamped at the end
        let again = explore.execute(session_id(1), 3).await.unwrap();
        assert_eq!(again, view.unwrap());
    }

    #[tokio::test]
    async fn engage_targets_current_opponent() {
        let mut record = fresh_record();
        record.navigate(Direction::Next).unwrap();
        record.navigate(Direction::Next).unwrap();
        let mut repo = stored(record);
        repo.expect_set()
            .withf(|_, record| {
                record.phase() == SessionPhase::InBattle
                    && record.encounter().map(|e| e.current_index()) == Some(2)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let view = explore(repo, battle_renderer())
            .execute(session_id(1), 2)
            .await
            .unwrap();

        assert_eq!(
            view,
            SessionView::BattleEntry {
                image: ImageRef::new("battle:opponent-2:30"),
            }
        );
    }

    #[tokio::test]
    async fn engage_render_failure_writes_nothing() {
        let mut repo = stored(fresh_record());
        repo.expect_set().times(0);
        let mut renderer = MockFrameRenderer::new();
        renderer
            .expect_battle_image()
            .returning(|_, _, _| Err(UpstreamError::request_failed("renderer", "boom")));

        let result = explore(repo, renderer).execute(session_id(1), 2).await;

        assert!(matches!(result, Err(SessionError::Upstream(_))));
    }

    #[tokio::test]
    async fn unknown_button_rerenders_without_writing() {
        let mut repo = stored(fresh_record());
        repo.expect_set().times(0);

        let view = explore(repo, MockFrameRenderer::new())
            .execute(session_id(1), 4)
            .await
            .unwrap();

        assert!(matches!(view, SessionView::Browsing { .. }));
    }

    #[tokio::test]
    async fn navigating_out_of_battle_returns_to_browsing() {
        let mut record = fresh_record();
        record.engage().unwrap();
        let mut repo = stored(record);
        repo.expect_set()
            .withf(|_, record| record.phase() == SessionPhase::Browsing)
            .times(1)
            .returning(|_, _| Ok(()));

        let view = explore(repo, MockFrameRenderer::new())
            .execute(session_id(1), 3)
            .await
            .unwrap();

        assert_eq!(
            view,
            SessionView::Browsing {
                portrait: ImageRef::new("https://img.test/1.png"),
                has_next: true,
            }
        );
    }

    #[tokio::test]
    async fn explore_after_resolution_shows_result() {
        let mut record = fresh_record();
        record.engage().unwrap();
        record.resolve(BattleOutcome::Draw).unwrap();
        let mut repo = stored(record);
        repo.expect_set().times(0);

        let view = explore(repo, MockFrameRenderer::new())
            .execute(session_id(1), 3)
            .await
            .unwrap();

        assert!(matches!(
            view,
            SessionView::Resolved {
                outcome: BattleOutcome::Draw,
                ..
            }
        ));
    }
}
