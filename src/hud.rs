//! Read-only snapshots of a session for the renderer and the HUD
//!
//! The simulation never draws; platform code takes one of each per frame.

use serde::Serialize;

use crate::sim::{GameState, Rect, Star};

/// A letter as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterView {
    pub rect: Rect,
    pub glyph: char,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView<'a> {
    pub player: Rect,
    pub letters: Vec<LetterView>,
    pub background_x: f32,
    pub stars: &'a [Star],
}

impl<'a> FrameView<'a> {
    pub fn capture(state: &'a GameState) -> Self {
        Self {
            player: state.player.rect(),
            letters: state
                .letters
                .iter()
                .map(|l| LetterView {
                    rect: l.rect(),
                    glyph: l.glyph,
                })
                .collect(),
            background_x: state.background_x,
            stars: &state.stars,
        }
    }
}

/// Score panel contents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudView {
    pub score: i32,
    pub lives: i32,
    pub level: u32,
    /// Target word with uncollected letters masked
    pub word: String,
    /// "Level N" while the level-up banner is up
    pub banner: Option<String>,
    pub paused: bool,
    pub game_over: bool,
}

impl HudView {
    pub fn capture(state: &GameState) -> Self {
        Self {
            score: state.progress.score,
            lives: state.progress.lives,
            level: state.progress.level,
            word: state.progress.masked_word(),
            banner: state.banner.map(|b| b.text()),
            paused: state.paused,
            game_over: state.is_game_over(),
        }
    }

    /// Final score, once the run has ended
    pub fn final_score(&self) -> Option<i32> {
        self.game_over.then_some(self.score)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
