//! Per-frame simulation tick
//!
//! One call per display refresh. Motion is defined per call, so game speed
//! follows the frame rate.

use serde::{Deserialize, Serialize};

use super::motion::{
    Direction, HeldKeys, advance_letters, advance_player, detect_collision, scroll_background,
};
use super::progress::{CollisionOutcome, resolve_collision};
use super::state::GameState;

/// Input for a single frame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Direction keys held this frame
    pub keys: HeldKeys,
    /// Pause toggle (one-shot)
    pub toggle_pause: bool,
    /// Wall-clock time (ms), only used for the level banner
    pub now_ms: f64,
    /// Idle/demo mode - autopilot flies the craft
    pub idle_mode: bool,
}

/// What happened this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Collision resolved this frame, if any
    pub collision: Option<CollisionOutcome>,
    /// A new letter set was spawned because the field ran empty
    pub respawned: bool,
    /// False once the run is over; the caller stops requesting frames
    pub schedule_next: bool,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    // Banner runs on wall-clock time, paused or not
    state.expire_banner(input.now_ms);

    if input.toggle_pause {
        state.toggle_pause();
    }

    if state.paused || state.check_game_over() {
        outcome.schedule_next = !state.is_game_over();
        return outcome;
    }

    state.frame += 1;

    scroll_background(&mut state.background_x, &mut state.stars);

    let keys = if input.idle_mode {
        autopilot(state)
    } else {
        input.keys
    };
    advance_player(&mut state.player, &keys);

    let dropped = advance_letters(&mut state.letters);
    if dropped > 0 {
        log::debug!("{} letter(s) scrolled off", dropped);
    }

    if let Some(index) = detect_collision(&state.player, &state.letters) {
        outcome.collision = Some(resolve_collision(state, index, input.now_ms));
    }

    // Missed everything: give the player another go at the same letter
    if !state.is_game_over() && state.letters.is_empty() {
        state.respawn_letters();
        outcome.respawned = true;
    }

    outcome.schedule_next = !state.check_game_over();
    outcome
}

/// Keys that steer the craft toward the expected letter
fn autopilot(state: &GameState) -> HeldKeys {
    let mut keys = HeldKeys::default();

    let Some(target) = state
        .letters
        .iter()
        .filter(|l| l.is_expected(&state.progress))
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
    else {
        return keys;
    };

    let craft = state.player.rect();
    let dy = target.rect().center().y - craft.center().y;
    if dy.abs() > state.player.speed {
        keys.press(if dy < 0.0 { Direction::Up } else { Direction::Down });
    }

    // Close in while the letter is still ahead; holding right also ramps speed
    let dx = target.pos.x - craft.max().x;
    if dx > 0.0 {
        keys.press(Direction::Right);
    } else if dx < -craft.size.x {
        keys.press(Direction::Left);
    }

    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{GameEvent, GamePhase, LetterToken};
    use crate::sim::words::Tier;
    use glam::Vec2;

    fn spelling(word: &str, collected: &str) -> GameState {
        let mut state = GameState::new(12345, Tier::Easy).unwrap();
        state.progress.target = word.to_string();
        state.progress.collected = collected.to_string();
        state.respawn_letters();
        state.drain_events();
        state
    }

    /// Put a single token right on top of the craft so the next tick hits it
    fn place_on_player(state: &mut GameState, glyph: char) {
        let pos = state.player.pos + Vec2::new(20.0, 5.0);
        state.letters = vec![LetterToken::new(pos, glyph)];
    }

    fn input_at(now_ms: f64) -> TickInput {
        TickInput {
            now_ms,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_moves_world() {
        let mut state = spelling("CAT", "C");
        let before: Vec<f32> = state.letters.iter().map(|l| l.pos.x).collect();
        let input = TickInput {
            keys: HeldKeys {
                vertical: Some(Direction::Down),
                horizontal: None,
            },
            ..Default::default()
        };

        let outcome = tick(&mut state, &input);
        assert!(outcome.schedule_next);
        assert_eq!(state.frame, 1);
        assert_eq!(state.background_x, -SCROLL_SPEED);
        assert_eq!(state.player.pos.y, PLAYER_START_Y + PLAYER_MIN_SPEED);
        let after: Vec<f32> = state.letters.iter().map(|l| l.pos.x).collect();
        for (b, a) in before.iter().zip(&after) {
            assert_eq!(*a, b - SCROLL_SPEED);
        }
    }

    #[test]
    fn test_cat_walkthrough() {
        let mut state = spelling("CAT", "C");
        assert_eq!(state.progress.lives, 5);

        place_on_player(&mut state, 'A');
        let outcome = tick(&mut state, &input_at(0.0));
        assert_eq!(outcome.collision, Some(CollisionOutcome::Correct));
        assert_eq!(state.progress.score, 10);
        assert_eq!(state.progress.collected, "CA");
        assert_eq!(state.progress.expected_glyph(), Some('T'));

        place_on_player(&mut state, 'Q');
        let outcome = tick(&mut state, &input_at(16.0));
        assert_eq!(outcome.collision, Some(CollisionOutcome::Wrong));
        assert_eq!(state.progress.score, 5);
        assert_eq!(state.progress.lives, 4);
        assert_eq!(state.progress.expected_glyph(), Some('T'));
        assert_eq!(state.letters.len(), 3);

        place_on_player(&mut state, 'T');
        let outcome = tick(&mut state, &input_at(32.0));
        assert_eq!(outcome.collision, Some(CollisionOutcome::WordComplete { level: 2 }));
        assert_eq!(state.progress.score, 15);
        assert_eq!(state.progress.lives, 4);
        assert_eq!(state.progress.level, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(outcome.schedule_next);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::LevelUp { level: 2 }));
        assert!(matches!(events.last(), Some(GameEvent::RoundStarted { .. })));
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = spelling("MOON", "M");
        let held = HeldKeys {
            vertical: Some(Direction::Up),
            horizontal: Some(Direction::Right),
        };
        let moving = TickInput {
            keys: held,
            ..Default::default()
        };
        tick(&mut state, &moving);

        tick(
            &mut state,
            &TickInput {
                keys: held,
                toggle_pause: true,
                ..Default::default()
            },
        );
        assert!(state.paused);

        let player = state.player.clone();
        let letters = state.letters.clone();
        let progress = state.progress.clone();
        let background_x = state.background_x;
        let star_x = state.stars[0].pos.x;
        let frame = state.frame;

        for _ in 0..100 {
            let outcome = tick(&mut state, &moving);
            assert!(outcome.schedule_next);
        }
        assert_eq!(state.player.pos, player.pos);
        assert_eq!(state.player.speed, player.speed);
        assert_eq!(state.letters, letters);
        assert_eq!(state.progress.score, progress.score);
        assert_eq!(state.progress.collected, progress.collected);
        assert_eq!(state.background_x, background_x);
        assert_eq!(state.stars[0].pos.x, star_x);
        assert_eq!(state.frame, frame);

        // Resume continues from the frozen values
        tick(
            &mut state,
            &TickInput {
                keys: held,
                toggle_pause: true,
                ..Default::default()
            },
        );
        assert!(!state.paused);
        assert_eq!(state.frame, frame + 1);
        assert_eq!(state.player.pos.y, player.pos.y - player.speed);
        assert_eq!(state.background_x, background_x - SCROLL_SPEED);
    }

    #[test]
    fn test_empty_field_respawns() {
        let mut state = spelling("FISH", "FI");
        state.letters.clear();
        let outcome = tick(&mut state, &TickInput::default());
        assert!(outcome.respawned);
        assert_eq!(state.letters.len(), 3);
        assert_eq!(state.letters.iter().filter(|l| l.glyph == 'S').count(), 1);
    }

    #[test]
    fn test_no_respawn_while_paused() {
        let mut state = spelling("FISH", "FI");
        state.letters.clear();
        let outcome = tick(
            &mut state,
            &TickInput {
                toggle_pause: true,
                ..Default::default()
            },
        );
        assert!(!outcome.respawned);
        assert!(state.letters.is_empty());
    }

    #[test]
    fn test_scrolled_off_letters_cost_nothing() {
        let mut state = spelling("FISH", "FI");
        state.letters = vec![LetterToken::new(Vec2::new(-LETTER_SIZE + 1.0, 0.0), 'Z')];
        let outcome = tick(&mut state, &TickInput::default());
        assert!(outcome.respawned);
        assert_eq!(outcome.collision, None);
        assert_eq!(state.progress.lives, 5);
        assert_eq!(state.progress.score, 0);
    }

    #[test]
    fn test_game_over_checked_at_top_of_frame() {
        let mut state = spelling("CAT", "C");
        state.progress.lives = 0;
        let outcome = tick(&mut state, &TickInput::default());
        assert!(!outcome.schedule_next);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_game_over_stops_scheduling() {
        let mut state = spelling("CAT", "C");
        place_on_player(&mut state, 'Z');
        let outcome = tick(&mut state, &TickInput::default());
        assert_eq!(outcome.collision, Some(CollisionOutcome::GameOver));
        assert!(!outcome.schedule_next);

        // Frozen from here on
        let frame = state.frame;
        let outcome = tick(&mut state, &TickInput::default());
        assert!(!outcome.schedule_next);
        assert_eq!(state.frame, frame);
    }

    #[test]
    fn test_banner_hides_after_two_seconds_even_when_paused() {
        let mut state = spelling("CAT", "CA");
        place_on_player(&mut state, 'T');
        tick(&mut state, &input_at(1000.0));
        assert!(state.banner.is_some());

        tick(
            &mut state,
            &TickInput {
                toggle_pause: true,
                now_ms: 1500.0,
                ..Default::default()
            },
        );
        tick(&mut state, &input_at(2999.0));
        assert!(state.banner.is_some());
        tick(&mut state, &input_at(3000.0));
        assert!(state.banner.is_none());
    }

    #[test]
    fn test_idle_mode_spells_words() {
        let mut state = GameState::new(9, Tier::Easy).unwrap();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..3000 {
            if !tick(&mut state, &input).schedule_next {
                break;
            }
        }
        assert!(!state.is_game_over());
        assert!(state.progress.level >= 2);
        assert!(
            !state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::WrongLetter { .. }))
        );
    }
}
