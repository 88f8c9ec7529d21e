//! Letter spawning
//!
//! Each set holds the next expected letter plus two distractors, shuffled.
//! The first letter of every word is handed to the player for free, so a word
//! of length L needs L-1 catches.

use glam::Vec2;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::state::LetterToken;
use super::words::{Tier, words_for};
use crate::consts::*;

/// Distractors per set
pub const DISTRACTOR_COUNT: usize = 2;

/// Upper bound on rejection-sampling draws for a distractor
const MAX_DISTRACTOR_DRAWS: u32 = 64;

/// A freshly started round
#[derive(Debug, Clone)]
pub struct Round {
    /// Uppercase target word
    pub target: String,
    /// Pre-collected first letter
    pub collected: String,
    pub letters: Vec<LetterToken>,
}

/// Random height for a new token, fully inside the field
fn spawn_y(rng: &mut impl Rng) -> f32 {
    rng.random::<f32>() * (FIELD_HEIGHT - LETTER_SIZE)
}

/// Uniform A-Z letter that is not `exclude`
fn random_distractor(exclude: Option<char>, rng: &mut impl Rng) -> char {
    for _ in 0..MAX_DISTRACTOR_DRAWS {
        let glyph = char::from(b'A' + rng.random_range(0..26u8));
        if Some(glyph) != exclude {
            return glyph;
        }
    }
    // 64 misses in a row on a 1/26 exclusion does not happen with a sane RNG
    log::warn!("Distractor sampling exhausted, using fallback letter");
    if exclude == Some('A') { 'B' } else { 'A' }
}

/// Build a new active collection for the letter after `collected`
pub fn spawn_set(target: &str, collected: &str, rng: &mut impl Rng) -> Vec<LetterToken> {
    let idx = collected.len();
    let expected = target.get(idx..).and_then(|rest| rest.chars().next());

    let mut letters = Vec::with_capacity(1 + DISTRACTOR_COUNT);

    if let Some(glyph) = expected {
        letters.push(LetterToken::new(Vec2::new(FIELD_WIDTH, spawn_y(rng)), glyph));
    }

    for i in 0..DISTRACTOR_COUNT {
        let glyph = random_distractor(expected, rng);
        let x = FIELD_WIDTH + (i as f32 + 1.0) * DISTRACTOR_SPACING;
        letters.push(LetterToken::new(Vec2::new(x, spawn_y(rng)), glyph));
    }

    letters.shuffle(rng);
    letters
}

/// Pick a word for `tier` and set up its first letter set
pub fn spawn_new_round(tier: Tier, rng: &mut impl Rng) -> Round {
    let word = words_for(tier).choose(rng).copied().unwrap_or_else(|| {
        log::warn!("No words for tier {}", tier);
        ""
    });
    let target = word.to_uppercase();
    let collected: String = target.chars().take(1).collect();
    let letters = spawn_set(&target, &collected, rng);

    Round {
        target,
        collected,
        letters,
    }
}
