//! Audio system using Web Audio API
//!
//! Procedural background drone and effect blips, no audio files needed.
//! Volume comes straight from `Settings::gain`; the simulation never sees it.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Expected letter caught
    LetterCollect,
    /// Distractor hit
    WrongLetter,
    /// Word spelled
    LevelUp,
    /// Run ended
    GameOver,
}

impl SoundEffect {
    /// Effect to play for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::LetterCollected { .. } => Some(SoundEffect::LetterCollect),
            GameEvent::WrongLetter { .. } => Some(SoundEffect::WrongLetter),
            GameEvent::LevelUp { .. } => Some(SoundEffect::LevelUp),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }
}

/// Running background drone
struct Music {
    oscillators: Vec<OscillatorNode>,
    gain: GainNode,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    music: Option<Music>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            music: None,
            volume: 0.5,
        }
    }

    /// Set volume (0.0 - 1.0), applied to music immediately
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
        if let Some(music) = &self.music {
            music.gain.gain().set_value(self.volume * MUSIC_LEVEL);
        }
    }

    /// Start the drone from the beginning (no-op if already playing)
    pub fn play_music(&mut self) {
        let Some(ctx) = &self.ctx else { return };
        let _ = ctx.resume();
        if self.music.is_some() {
            return;
        }

        let Ok(gain) = ctx.create_gain() else { return };
        gain.gain().set_value(self.volume * MUSIC_LEVEL);
        if gain.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }

        // Slightly detuned fifth for a spacey hum
        let oscillators = [110.0, 110.7, 165.0]
            .iter()
            .filter_map(|freq| {
                let osc = ctx.create_oscillator().ok()?;
                osc.set_type(OscillatorType::Sine);
                osc.frequency().set_value(*freq);
                osc.connect_with_audio_node(&gain).ok()?;
                osc.start().ok()?;
                Some(osc)
            })
            .collect();

        self.music = Some(Music { oscillators, gain });
    }

    /// Freeze everything (pause menu)
    pub fn pause(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.suspend();
        }
    }

    /// Continue after `pause`
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Stop and rewind the music
    pub fn stop_music(&mut self) {
        if let Some(music) = self.music.take() {
            for osc in music.oscillators {
                let _ = osc.stop();
            }
            let _ = music.gain.disconnect();
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::LetterCollect => self.play_collect(ctx, vol),
            SoundEffect::WrongLetter => self.play_wrong(ctx, vol),
            SoundEffect::LevelUp => {
                self.play_arpeggio(ctx, vol, &[523.0, 659.0, 784.0, 1047.0], 0.1)
            }
            SoundEffect::GameOver => {
                self.play_arpeggio(ctx, vol, &[400.0, 350.0, 300.0, 200.0], 0.2)
            }
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Letter caught - quick rising chirp
    fn play_collect(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 600.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.15).ok();
        osc.frequency().exponential_ramp_to_value_at_time(1200.0, t + 0.1).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Wrong letter - low buzz
    fn play_wrong(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 140.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.35, t).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.3).ok();
        osc.frequency().exponential_ramp_to_value_at_time(70.0, t + 0.25).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();
    }

    /// Note sequence, `step` seconds apart
    fn play_arpeggio(&self, ctx: &AudioContext, vol: f32, freqs: &[f32], step: f64) {
        for (i, freq) in freqs.iter().enumerate() {
            let delay = i as f64 * step;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.35).ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.45).ok();
            }
        }
    }
}

/// Music sits under the effects
const MUSIC_LEVEL: f32 = 0.15;
