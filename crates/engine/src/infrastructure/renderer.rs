//! SVG frame cards.
//!
//! Cards are 1146x600 (the 1.91:1 frame aspect ratio) and are handed to the
//! client as base64 `data:` URIs, so no image hosting is required. Optional
//! PNG backgrounds from the asset directory are embedded when present.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use frame_survivor_domain::{BattleOutcome, CharacterAttributes, ImageRef, LootSlot, WinChance};
use frame_survivor_shared::escape_attribute;
use std::fmt::Write;
use std::path::Path;

use crate::infrastructure::ports::{FrameRenderer, UpstreamError};

const WIDTH: u32 = 1146;
const HEIGHT: u32 = 600;
const SERVICE: &str = "renderer";

// =============================================================================
// Inline assets
// =============================================================================

/// A binary asset embedded as a base64 payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAsset {
    media_type: &'static str,
    payload: String,
}

impl InlineAsset {
    pub fn from_bytes(media_type: &'static str, bytes: &[u8]) -> Self {
        Self {
            media_type,
            payload: BASE64_STANDARD.encode(bytes),
        }
    }

    /// Read a PNG from disk.
    pub async fn load_png(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::from_bytes("image/png", &bytes))
    }

    /// Read a PNG if it exists, logging and skipping it otherwise.
    pub async fn load_optional_png(path: &Path) -> Option<Self> {
        match Self::load_png(path).await {
            Ok(asset) => Some(asset),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Optional asset not loaded");
                None
            }
        }
    }

    pub fn to_image_ref(&self) -> ImageRef {
        ImageRef::data_uri(self.media_type, &self.payload)
    }
}

/// The pre-rendered draw card, or a generated stand-in when `draw.png` is
/// missing.
pub async fn load_draw_card(asset_dir: &Path) -> ImageRef {
    let path = asset_dir.join("draw.png");
    match InlineAsset::load_png(&path).await {
        Ok(asset) => asset.to_image_ref(),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "draw.png not found, using generated draw card"
            );
            svg_data_uri(&result_svg(None, "DRAW", "That..is..Unbelievable", None))
        }
    }
}

/// Backgrounds for the cards rendered per request.
///
/// Roster portraits are stored in every session record, so they stay plain.
#[derive(Debug, Clone, Default)]
pub struct CardBackgrounds {
    pub battle: Option<InlineAsset>,
    pub win: Option<InlineAsset>,
    pub loss: Option<InlineAsset>,
}

impl CardBackgrounds {
    pub async fn load(asset_dir: &Path) -> Self {
        Self {
            battle: InlineAsset::load_optional_png(&asset_dir.join("battle_bg.png")).await,
            win: InlineAsset::load_optional_png(&asset_dir.join("win_bg.png")).await,
            loss: InlineAsset::load_optional_png(&asset_dir.join("loss_bg.png")).await,
        }
    }
}

// =============================================================================
// Renderer
// =============================================================================

pub struct SvgFrameRenderer {
    backgrounds: CardBackgrounds,
}

impl SvgFrameRenderer {
    pub fn new(backgrounds: CardBackgrounds) -> Self {
        Self { backgrounds }
    }
}

#[async_trait]
impl FrameRenderer for SvgFrameRenderer {
    async fn profile_image(
        &self,
        player: &CharacterAttributes,
        opponent: &CharacterAttributes,
    ) -> Result<ImageRef, UpstreamError> {
        let mut body = String::new();
        push_text(&mut body, 573, 60, 40, "middle", "ENEMY SPOTTED");
        push_column(&mut body, 60, "YOU", player);
        push_column(&mut body, 620, "ENEMY", opponent);
        Ok(svg_data_uri(&wrap_svg(&body)))
    }

    async fn battle_image(
        &self,
        player: &CharacterAttributes,
        opponent: &CharacterAttributes,
        win_chance: WinChance,
    ) -> Result<ImageRef, UpstreamError> {
        let mut body = String::new();
        push_background(&mut body, self.backgrounds.battle.as_ref());
        push_text(&mut body, 573, 60, 40, "middle", "BATTLE");
        push_column(&mut body, 60, "YOU", player);
        push_column(&mut body, 620, "ENEMY", opponent);
        push_text(
            &mut body,
            573,
            560,
            32,
            "middle",
            &format!("Win chance: {win_chance}"),
        );
        Ok(svg_data_uri(&wrap_svg(&body)))
    }

    async fn result_image(
        &self,
        outcome: BattleOutcome,
        win_chance: WinChance,
    ) -> Result<ImageRef, UpstreamError> {
        let (background, title, subtitle) = match outcome {
            BattleOutcome::Win => (self.backgrounds.win.as_ref(), "VICTORY", "You survived."),
            BattleOutcome::Lose => (self.backgrounds.loss.as_ref(), "DEFEAT", "You fell."),
            BattleOutcome::Draw => {
                return Err(UpstreamError::invalid_response(
                    SERVICE,
                    "draw results use the pre-rendered draw card",
                ))
            }
        };
        Ok(svg_data_uri(&result_svg(
            background,
            title,
            subtitle,
            Some(win_chance),
        )))
    }
}

// =============================================================================
// SVG helpers
// =============================================================================

fn svg_data_uri(svg: &str) -> ImageRef {
    ImageRef::data_uri("image/svg+xml", &BASE64_STANDARD.encode(svg.as_bytes()))
}

fn wrap_svg(body: &str) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}"><rect width="100%" height="100%" fill="#14110f"/>{body}</svg>"##
    )
}

fn result_svg(
    background: Option<&InlineAsset>,
    title: &str,
    subtitle: &str,
    win_chance: Option<WinChance>,
) -> String {
    let mut body = String::new();
    push_background(&mut body, background);
    push_text(&mut body, 573, 260, 96, "middle", title);
    push_text(&mut body, 573, 340, 36, "middle", subtitle);
    if let Some(chance) = win_chance {
        push_text(
            &mut body,
            573,
            420,
            28,
            "middle",
            &format!("Your odds were {chance}"),
        );
    }
    wrap_svg(&body)
}

fn push_background(body: &mut String, background: Option<&InlineAsset>) {
    if let Some(asset) = background {
        let _ = write!(
            body,
            r#"<image href="{}" width="{WIDTH}" height="{HEIGHT}" preserveAspectRatio="xMidYMid slice"/>"#,
            asset.to_image_ref()
        );
    }
}

fn push_text(body: &mut String, x: u32, y: u32, size: u32, anchor: &str, text: &str) {
    let _ = write!(
        body,
        r##"<text x="{x}" y="{y}" font-family="monospace" font-size="{size}" fill="#f4e9d8" text-anchor="{anchor}">{}</text>"##,
        escape_attribute(text)
    );
}

/// One character's item list, in slot order.
fn push_column(body: &mut String, x: u32, heading: &str, attributes: &CharacterAttributes) {
    push_text(body, x, 130, 30, "start", &format!("{heading} {}", attributes.short_owner()));
    for (row, slot) in LootSlot::ALL.into_iter().enumerate() {
        let line = match attributes.item(slot) {
            Some(item) => format!("{:<6} {} ({})", slot.as_str(), item.name, item.greatness),
            None => format!("{:<6} -", slot.as_str()),
        };
        push_text(body, x, 180 + 40 * row as u32, 22, "start", &line);
    }
    push_text(
        body,
        x,
        510,
        24,
        "start",
        &format!("Greatness {}", attributes.total_greatness()),
    );
}
