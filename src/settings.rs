//! Game settings
//!
//! Memory-resident only: a reload starts from the defaults again.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::{GameState, Tier, apply_difficulty};

/// Highest volume step
pub const MAX_VOLUME: u8 = 100;

/// Player-facing settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Music/effects volume, 0-100. Only the audio layer reads this.
    pub volume: u8,
    /// Word list and starting lives
    pub difficulty: Tier,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: 50,
            difficulty: Tier::Easy,
        }
    }
}

/// Rejected settings input
#[derive(Debug)]
pub enum SettingsError {
    /// Not valid JSON, or wrong field types
    Parse(serde_json::Error),
    VolumeOutOfRange(u32),
    UnknownDifficulty(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "invalid settings: {}", e),
            SettingsError::VolumeOutOfRange(v) => {
                write!(f, "volume {} out of range 0-{}", v, MAX_VOLUME)
            }
            SettingsError::UnknownDifficulty(s) => write!(f, "unknown difficulty {:?}", s),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl Settings {
    /// Parse a JSON document such as `{"volume": 80, "difficulty": "hard"}`.
    /// Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        #[derive(Deserialize)]
        #[serde(default)]
        struct Raw {
            volume: u32,
            difficulty: String,
        }

        impl Default for Raw {
            fn default() -> Self {
                let d = Settings::default();
                Self {
                    volume: d.volume as u32,
                    difficulty: d.difficulty.as_str().to_string(),
                }
            }
        }

        let raw: Raw = serde_json::from_str(json)?;
        Self::from_form(raw.volume, &raw.difficulty)
    }

    /// Build settings from raw form values (volume slider, difficulty select)
    pub fn from_form(volume: u32, difficulty: &str) -> Result<Self, SettingsError> {
        let volume = u8::try_from(volume)
            .ok()
            .filter(|v| *v <= MAX_VOLUME)
            .ok_or(SettingsError::VolumeOutOfRange(volume))?;
        let difficulty = Tier::from_str(difficulty)
            .ok_or_else(|| SettingsError::UnknownDifficulty(difficulty.to_string()))?;
        Ok(Self { volume, difficulty })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Volume as a 0.0-1.0 gain
    pub fn gain(&self) -> f32 {
        self.volume.min(MAX_VOLUME) as f32 / MAX_VOLUME as f32
    }

    /// Save into a running session. Lives are reset to the tier's allowance
    /// even mid-round.
    pub fn apply(&self, state: &mut GameState) {
        apply_difficulty(state, self.difficulty);
        log::info!(
            "Settings applied: volume={}, difficulty={}",
            self.volume,
            self.difficulty
        );
    }
}
