//! Game state and core simulation types
//!
//! One `GameState` is one session. Every update function takes it explicitly,
//! so independent sessions can run side by side and tests can seed the RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::progress;
use super::rect::Rect;
use super::spawn::{spawn_new_round, spawn_set};
use super::words::{self, Tier, WordBankError};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Word spelled; the next round is being set up (transient within a frame)
    RoundComplete,
    /// Run ended
    GameOver,
}

/// Things that happened during a frame, for audio and HUD collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new target word was picked
    RoundStarted { target: String },
    /// The expected letter was collected
    LetterCollected { glyph: char },
    /// A distractor was hit
    WrongLetter { glyph: char },
    /// A word was completed and the level advanced
    LevelUp { level: u32 },
    /// Lives ran out or the score went negative
    GameOver { score: i32 },
    Paused,
    Resumed,
}

/// The player's spacecraft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Per-frame velocity, reassigned from held keys every frame
    pub vel: Vec2,
    /// Vertical speed magnitude, kept in [PLAYER_MIN_SPEED, PLAYER_MAX_SPEED]
    pub speed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            speed: PLAYER_MIN_SPEED,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A scrolling letter. Whether it is the correct one is never stored;
/// ask `is_expected` against the current progress instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterToken {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Uppercase A-Z
    pub glyph: char,
}

impl LetterToken {
    pub fn new(pos: Vec2, glyph: char) -> Self {
        Self {
            pos,
            size: Vec2::splat(LETTER_SIZE),
            glyph,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// True if collecting this token would extend the spelled prefix
    pub fn is_expected(&self, progress: &Progress) -> bool {
        progress.expected_glyph() == Some(self.glyph)
    }

    /// Right edge has passed the left side of the field
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// A background star (visual only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    /// Parallax factor applied to SCROLL_SPEED
    pub speed: f32,
}

impl Star {
    fn random(rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * FIELD_WIDTH,
                rng.random::<f32>() * FIELD_HEIGHT,
            ),
            size: rng.random::<f32>() * 2.0 + 1.0,
            speed: rng.random::<f32>() * 0.5 + 0.5,
        }
    }

    pub fn scroll(&mut self) {
        self.pos.x = (self.pos.x - SCROLL_SPEED * self.speed) % FIELD_WIDTH;
        if self.pos.x < 0.0 {
            self.pos.x = FIELD_WIDTH;
        }
    }
}

/// Score, lives, level and spelling progress.
/// Only the progression controller writes to this.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Uppercase word being spelled this round
    pub target: String,
    /// Prefix of `target` collected so far
    pub collected: String,
    pub score: i32,
    pub lives: i32,
    /// Starts at 1, +1 per completed word
    pub level: u32,
}

impl Progress {
    /// Index of the next letter to collect
    #[inline]
    pub fn next_index(&self) -> usize {
        self.collected.len()
    }

    /// The glyph the player must hit next (None once the word is spelled)
    pub fn expected_glyph(&self) -> Option<char> {
        self.target[self.next_index()..].chars().next()
    }

    pub fn is_word_complete(&self) -> bool {
        !self.target.is_empty() && self.collected == self.target
    }

    /// Lives exhausted or score negative
    pub fn is_terminal(&self) -> bool {
        self.lives <= 0 || self.score < 0
    }

    /// Target word with uncollected positions replaced by MASK_CHAR
    pub fn masked_word(&self) -> String {
        let shown = self.collected.chars().count();
        self.target
            .chars()
            .enumerate()
            .map(|(i, c)| if i < shown { c } else { MASK_CHAR })
            .collect()
    }
}

/// Pending level-up banner. A newer level-up replaces it (last writer wins).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelBanner {
    pub level: u32,
    /// Wall-clock time (ms) after which the banner is hidden
    pub hide_at_ms: f64,
}

impl LevelBanner {
    pub fn text(&self) -> String {
        format!("Level {}", self.level)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG (word picks, letter placement, distractors)
    pub rng: Pcg32,
    /// Difficulty currently in effect
    pub tier: Tier,
    /// Current phase
    pub phase: GamePhase,
    /// Pause toggle (independent of phase)
    pub paused: bool,
    /// Simulated frame counter
    pub frame: u64,
    /// Player craft
    pub player: Player,
    /// Active letters (at most 3), in spawn/shuffle order
    pub letters: Vec<LetterToken>,
    /// Spelling progress and counters
    pub progress: Progress,
    /// Background scroll offset, wraps at -FIELD_WIDTH
    pub background_x: f32,
    /// Parallax stars (not gameplay-affecting)
    pub stars: Vec<Star>,
    /// Level-up banner, if showing
    pub banner: Option<LevelBanner>,
    /// Events since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session with the given seed and difficulty, already playing
    pub fn new(seed: u64, tier: Tier) -> Result<Self, WordBankError> {
        words::validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT).map(|_| Star::random(&mut rng)).collect();

        let mut state = Self {
            seed,
            rng,
            tier,
            phase: GamePhase::Playing,
            paused: false,
            frame: 0,
            player: Player::default(),
            letters: Vec::new(),
            progress: Progress::default(),
            background_x: 0.0,
            stars,
            banner: None,
            events: Vec::new(),
        };
        state.start();
        Ok(state)
    }

    /// (Re)start a run: fresh counters, lives for the current tier, new word
    pub fn start(&mut self) {
        self.progress.score = 0;
        self.progress.level = 1;
        self.phase = GamePhase::Playing;
        self.paused = false;
        self.player = Player::default();
        self.banner = None;
        let tier = self.tier;
        progress::apply_difficulty(self, tier);
        self.begin_round();
        log::info!(
            "Run started: tier={}, lives={}, seed={}",
            self.tier,
            self.progress.lives,
            self.seed
        );
    }

    /// Pick the next word and spawn its first letter set
    pub fn begin_round(&mut self) {
        let round = spawn_new_round(self.tier, &mut self.rng);
        log::info!("New word: {} ({} letters)", round.target, round.target.len());
        self.progress.target = round.target;
        self.progress.collected = round.collected;
        self.letters = round.letters;
        self.phase = GamePhase::Playing;
        self.push_event(GameEvent::RoundStarted {
            target: self.progress.target.clone(),
        });
    }

    /// Replace the active letters with a fresh set for the current index
    pub fn respawn_letters(&mut self) {
        self.letters = spawn_set(&self.progress.target, &self.progress.collected, &mut self.rng);
        log::debug!(
            "Spawned {:?} expecting {:?}",
            self.letters.iter().map(|l| l.glyph).collect::<String>(),
            self.progress.expected_glyph()
        );
    }

    /// Show the level banner until LEVEL_BANNER_MS after `now_ms`
    pub fn show_level_banner(&mut self, level: u32, now_ms: f64) {
        self.banner = Some(LevelBanner {
            level,
            hide_at_ms: now_ms + LEVEL_BANNER_MS,
        });
    }

    /// Hide the banner once its time is up
    pub fn expire_banner(&mut self, now_ms: f64) {
        if self.banner.is_some_and(|b| now_ms >= b.hide_at_ms) {
            self.banner = None;
        }
    }

    /// Flip the pause flag (ignored once the run is over)
    pub fn toggle_pause(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.paused = !self.paused;
        let event = if self.paused {
            GameEvent::Paused
        } else {
            GameEvent::Resumed
        };
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
        self.push_event(event);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Enter GameOver if lives or score say so. Returns true if the run is over.
    pub fn check_game_over(&mut self) -> bool {
        if self.phase != GamePhase::GameOver && self.progress.is_terminal() {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over: score={}, level={}",
                self.progress.score,
                self.progress.level
            );
            self.push_event(GameEvent::GameOver {
                score: self.progress.score,
            });
        }
        self.is_game_over()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
