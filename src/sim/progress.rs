//! Progression: scoring, lives, level ups and game over
//!
//! Sole writer of `GameState::progress`. Reacts to at most one collision per
//! frame.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState};
use super::words::Tier;
use crate::consts::*;

/// What a collision did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionOutcome {
    /// Expected letter caught, word not finished yet
    Correct,
    /// Expected letter caught and the word is spelled; `level` is the new level
    WordComplete { level: u32 },
    /// Distractor hit, run continues
    Wrong,
    /// Distractor hit and the run is over
    GameOver,
}

/// Resolve a collision with `state.letters[index]`, consuming that token
pub fn resolve_collision(state: &mut GameState, index: usize, now_ms: f64) -> CollisionOutcome {
    let token = state.letters.remove(index);

    if token.is_expected(&state.progress) {
        state.progress.collected.push(token.glyph);
        state.progress.score += CORRECT_LETTER_POINTS;
        state.push_event(GameEvent::LetterCollected { glyph: token.glyph });
        log::debug!(
            "Caught {} -> {} (score {})",
            token.glyph,
            state.progress.masked_word(),
            state.progress.score
        );

        if state.progress.is_word_complete() {
            state.phase = GamePhase::RoundComplete;
            state.progress.level += 1;
            let level = state.progress.level;
            log::info!("Spelled {}! Level {}", state.progress.target, level);
            state.show_level_banner(level, now_ms);
            state.push_event(GameEvent::LevelUp { level });
            state.begin_round();
            return CollisionOutcome::WordComplete { level };
        }

        state.respawn_letters();
        CollisionOutcome::Correct
    } else {
        state.progress.lives -= 1;
        state.progress.score -= WRONG_LETTER_PENALTY;
        state.push_event(GameEvent::WrongLetter { glyph: token.glyph });
        log::debug!(
            "Wrong letter {} (expected {:?}), lives={}, score={}",
            token.glyph,
            state.progress.expected_glyph(),
            state.progress.lives,
            state.progress.score
        );

        if state.check_game_over() {
            return CollisionOutcome::GameOver;
        }

        // Same expected letter, new distractors
        state.respawn_letters();
        CollisionOutcome::Wrong
    }
}

/// Switch difficulty and reset lives to that tier's allowance.
/// Applies mid-round too: lives are reset even while a word is in progress.
pub fn apply_difficulty(state: &mut GameState, tier: Tier) {
    state.tier = tier;
    state.progress.lives = tier.starting_lives();
    log::info!("Difficulty {} ({} lives)", tier, state.progress.lives);
}
