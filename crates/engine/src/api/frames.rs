//! Session views to frame documents.

use frame_survivor_domain::BattleOutcome;
use frame_survivor_shared::FrameDocument;

use crate::infrastructure::config::EngineConfig;
use crate::use_cases::session::SessionView;

pub const PREVIOUS_LABEL: &str = "◀︎ Previous Enemy";
pub const BATTLE_LABEL: &str = "◉ Battle";
pub const NEXT_LABEL: &str = "▶︎ Next Enemy";
pub const FLEE_LABEL: &str = "Get the hell out of here!(WIP)";
pub const FIGHT_LABEL: &str = "Fight like a MAN!";
pub const WIN_LABEL: &str = "Doubt You Can Survive Again!";
pub const LOSE_LABEL: &str = "You'll Make it This Time";
pub const DRAW_LABEL: &str = "That..is..Unbelievable";

/// Chooses post URL and buttons for each screen.
#[derive(Debug, Clone)]
pub struct FrameResponder {
    start_url: String,
    explore_url: String,
    battle_url: String,
}

impl FrameResponder {
    pub fn new(
        start_url: impl Into<String>,
        explore_url: impl Into<String>,
        battle_url: impl Into<String>,
    ) -> Self {
        Self {
            start_url: start_url.into(),
            explore_url: explore_url.into(),
            battle_url: battle_url.into(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.endpoint("start"),
            config.endpoint("explore"),
            config.endpoint("battle"),
        )
    }

    pub fn document(&self, view: &SessionView) -> FrameDocument {
        match view {
            SessionView::Browsing { portrait, has_next } => {
                let document = FrameDocument::new(&self.explore_url, portrait.as_str())
                    .with_button(PREVIOUS_LABEL)
                    .with_button(BATTLE_LABEL);
                if *has_next {
                    document.with_button(NEXT_LABEL)
                } else {
                    document
                }
            }
            SessionView::BattleEntry { image } => {
                FrameDocument::new(&self.battle_url, image.as_str())
                    .with_button(FLEE_LABEL)
                    .with_button(FIGHT_LABEL)
            }
            SessionView::Resolved { outcome, image } => {
                let label = match outcome {
                    BattleOutcome::Win => WIN_LABEL,
                    BattleOutcome::Lose => LOSE_LABEL,
                    BattleOutcome::Draw => DRAW_LABEL,
                };
                FrameDocument::new(&self.start_url, image.as_str()).with_button(label)
            }
        }
    }
}
