//! Star Speller - An arcade spelling game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (words, spawning, motion, progression)
//! - `settings`: Player-facing configuration (volume, difficulty)
//! - `hud`: Render and HUD snapshots handed to the platform layer
//! - `renderer`: 2D canvas drawing (wasm only)
//! - `audio`: Procedural Web Audio music and effects (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod hud;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use hud::{FrameView, HudView};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (canvas pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Spacecraft size and spawn point
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 300.0;

    /// Vertical speed bounds (pixels per frame)
    pub const PLAYER_MIN_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_SPEED: f32 = 10.0;
    /// Horizontal velocity while left/right is held (pixels per frame)
    pub const PLAYER_STRAFE_SPEED: f32 = 2.0;
    /// How much horizontal velocity feeds into vertical speed each frame
    pub const SPEED_RAMP: f32 = 0.1;

    /// Letter tokens are square
    pub const LETTER_SIZE: f32 = 30.0;
    /// Horizontal gap between distractors at spawn
    pub const DISTRACTOR_SPACING: f32 = 100.0;

    /// Background and letter scroll speed (pixels per frame)
    pub const SCROLL_SPEED: f32 = 2.0;
    /// Parallax star count
    pub const STAR_COUNT: usize = 100;

    /// Scoring
    pub const CORRECT_LETTER_POINTS: i32 = 10;
    pub const WRONG_LETTER_PENALTY: i32 = 5;

    /// Level-up banner lifetime (wall clock)
    pub const LEVEL_BANNER_MS: f64 = 2000.0;

    /// Placeholder for uncollected letters in the HUD word
    pub const MASK_CHAR: char = '_';
}
