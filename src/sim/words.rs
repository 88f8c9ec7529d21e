//! Word bank: fixed candidate words per difficulty tier

use std::fmt;

use serde::{Deserialize, Serialize};

/// Difficulty tier, selecting the word list and starting lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Tier::Easy),
            "medium" | "med" => Some(Tier::Medium),
            "hard" => Some(Tier::Hard),
            _ => None,
        }
    }

    /// Lives granted when a game starts (or settings are saved) on this tier
    pub fn starting_lives(&self) -> i32 {
        match self {
            Tier::Easy => 5,
            Tier::Medium => 3,
            Tier::Hard => 1,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const EASY_WORDS: &[&str] = &[
    "cat", "dog", "sun", "moon", "star", "hat", "ball", "tree", "fish", "bird", "book", "car",
    "house", "apple", "bear",
];

const MEDIUM_WORDS: &[&str] = &[
    "elephant", "giraffe", "rainbow", "planet", "ocean", "mountain", "butterfly", "dinosaur",
    "computer", "bicycle", "library", "telescope", "calendar", "umbrella", "playground",
];

const HARD_WORDS: &[&str] = &[
    "photosynthesis",
    "civilization",
    "electromagnetic",
    "revolutionary",
    "biodiversity",
    "entrepreneurship",
    "extraterrestrial",
    "nanotechnology",
    "sustainability",
    "archaeology",
    "biotechnology",
    "cryptocurrency",
    "astrophysics",
    "paleontology",
    "metamorphosis",
];

/// Candidate words (lowercase) for a tier
pub fn words_for(tier: Tier) -> &'static [&'static str] {
    match tier {
        Tier::Easy => EASY_WORDS,
        Tier::Medium => MEDIUM_WORDS,
        Tier::Hard => HARD_WORDS,
    }
}

/// Word bank misconfiguration, reported once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordBankError {
    /// A tier has no words to pick from
    EmptyTier(Tier),
    /// A word is empty or contains something other than ASCII letters
    InvalidWord { tier: Tier, word: &'static str },
}

impl fmt::Display for WordBankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordBankError::EmptyTier(tier) => write!(f, "word list for tier '{}' is empty", tier),
            WordBankError::InvalidWord { tier, word } => {
                write!(f, "invalid word {:?} in tier '{}'", word, tier)
            }
        }
    }
}

impl std::error::Error for WordBankError {}

/// Check every tier has at least one spellable word
pub fn validate() -> Result<(), WordBankError> {
    for tier in Tier::ALL {
        validate_list(tier, words_for(tier))?;
    }
    Ok(())
}

fn validate_list(tier: Tier, words: &'static [&'static str]) -> Result<(), WordBankError> {
    if words.is_empty() {
        return Err(WordBankError::EmptyTier(tier));
    }
    if let Some(word) = words
        .iter()
        .find(|w| w.is_empty() || !w.bytes().all(|b| b.is_ascii_alphabetic()))
    {
        return Err(WordBankError::InvalidWord { tier, word });
    }
    Ok(())
}
