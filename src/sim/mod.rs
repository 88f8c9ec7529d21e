//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-frame motion only (no wall-clock deltas)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod motion;
pub mod progress;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod words;

pub use motion::{Direction, HeldKeys, advance_letters, advance_player, detect_collision};
pub use progress::{CollisionOutcome, apply_difficulty, resolve_collision};
pub use rect::Rect;
pub use spawn::{Round, spawn_new_round, spawn_set};
pub use state::{
    GameEvent, GamePhase, GameState, LetterToken, LevelBanner, Player, Progress, Star,
};
pub use tick::{TickInput, TickOutcome, tick};
pub use words::{Tier, WordBankError, words_for};
