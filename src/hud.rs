//! Text overlay layout
//!
//! Describes the score label and the game-over screen as plain data.
//! Presenters decide fonts and colors.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{FrameSnapshot, Rect};

/// Alpha of the full-screen dim layer shown on game over
pub const GAME_OVER_DIM_ALPHA: u8 = 160;

/// One overlay layer, drawn in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HudItem {
    /// Translucent black rectangle
    Dim { rect: Rect, alpha: u8 },
    /// Text with its baseline-left anchor at (x, y)
    Text { text: String, x: f32, y: f32, size_px: f32 },
}

/// Build the overlay for a frame
pub fn overlay(frame: &FrameSnapshot, settings: &Settings) -> Vec<HudItem> {
    let mut items = vec![HudItem::Text {
        text: format!("Score: {}", frame.score),
        x: 20.0,
        y: settings.dp_to_px(40.0),
        size_px: settings.dp_to_px(settings.score_text_size),
    }];

    if frame.is_over() {
        let w = frame.viewport.width_f();
        let h = frame.viewport.height_f();
        items.push(HudItem::Dim {
            rect: Rect::new(0.0, 0.0, w, h),
            alpha: GAME_OVER_DIM_ALPHA,
        });
        items.push(HudItem::Text {
            text: "Game Over".to_string(),
            x: w * 0.35,
            y: h * 0.4,
            size_px: settings.dp_to_px(settings.game_over_text_size),
        });
        items.push(HudItem::Text {
            text: "Tap to try again".to_string(),
            x: w * 0.33,
            y: h * 0.5,
            size_px: settings.dp_to_px(settings.retry_text_size),
        });
    }

    items
}

/// Score label only, for text-mode presenters
pub fn score_label(frame: &FrameSnapshot) -> String {
    format!("Score: {}", frame.score)
}
