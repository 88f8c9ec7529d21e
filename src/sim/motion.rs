//! Motion and collision
//!
//! All deltas are per frame. The craft may only roam the left half of the
//! field; letters scroll right to left at the background speed.

use serde::{Deserialize, Serialize};

use super::state::{LetterToken, Player, Star};
use crate::consts::*;

/// Arrow directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// Direction input, one slot per axis.
///
/// The most recent press on an axis wins; releasing either key of that axis
/// clears it, even if the opposite key is still down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    pub vertical: Option<Direction>,
    pub horizontal: Option<Direction>,
}

impl HeldKeys {
    pub fn press(&mut self, dir: Direction) {
        if dir.is_vertical() {
            self.vertical = Some(dir);
        } else {
            self.horizontal = Some(dir);
        }
    }

    pub fn release(&mut self, dir: Direction) {
        if dir.is_vertical() {
            self.vertical = None;
        } else {
            self.horizontal = None;
        }
    }

    /// -1 (up), 0 or +1 (down)
    pub fn vertical(&self) -> f32 {
        match self.vertical {
            Some(Direction::Up) => -1.0,
            Some(Direction::Down) => 1.0,
            _ => 0.0,
        }
    }

    /// -1 (left), 0 or +1 (right)
    pub fn horizontal(&self) -> f32 {
        match self.horizontal {
            Some(Direction::Left) => -1.0,
            Some(Direction::Right) => 1.0,
            _ => 0.0,
        }
    }
}

/// Move the craft one frame and clamp it to the playable area
pub fn advance_player(player: &mut Player, keys: &HeldKeys) {
    // Velocity is assigned from input, never accumulated
    player.vel.y = keys.vertical() * player.speed;
    player.vel.x = keys.horizontal() * PLAYER_STRAFE_SPEED;

    player.pos.y += player.vel.y;
    player.speed =
        (player.speed + player.vel.x * SPEED_RAMP).clamp(PLAYER_MIN_SPEED, PLAYER_MAX_SPEED);

    player.pos.y = player.pos.y.clamp(0.0, FIELD_HEIGHT - player.size.y);
    player.pos.x = (player.pos.x + player.vel.x).clamp(0.0, FIELD_WIDTH / 2.0);
}

/// Scroll letters left and drop the ones that have left the field.
/// Returns how many were dropped.
pub fn advance_letters(letters: &mut Vec<LetterToken>) -> usize {
    let before = letters.len();
    for letter in letters.iter_mut() {
        letter.pos.x -= SCROLL_SPEED;
    }
    letters.retain(|l| !l.is_off_screen());
    before - letters.len()
}

/// Index of the first letter (in collection order) overlapping the craft
pub fn detect_collision(player: &Player, letters: &[LetterToken]) -> Option<usize> {
    let craft = player.rect();
    letters.iter().position(|l| craft.overlaps(&l.rect()))
}

/// Scroll the background offset and the star field by one frame
pub fn scroll_background(background_x: &mut f32, stars: &mut [Star]) {
    *background_x -= SCROLL_SPEED;
    if *background_x <= -FIELD_WIDTH {
        *background_x = 0.0;
    }
    for star in stars.iter_mut() {
        star.scroll();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn keys(pressed: &[Direction]) -> HeldKeys {
        let mut held = HeldKeys::default();
        for dir in pressed {
            held.press(*dir);
        }
        held
    }

    #[test]
    fn test_vertical_motion_uses_speed() {
        let mut player = Player::default();
        advance_player(&mut player, &keys(&[Direction::Down]));
        assert_eq!(player.pos.y, PLAYER_START_Y + PLAYER_MIN_SPEED);
        assert_eq!(player.vel.y, PLAYER_MIN_SPEED);

        advance_player(&mut player, &HeldKeys::default());
        assert_eq!(player.vel, Vec2::ZERO);
        assert_eq!(player.pos.y, PLAYER_START_Y + PLAYER_MIN_SPEED);
    }

    #[test]
    fn test_right_ramps_speed_up_to_max() {
        let mut player = Player::default();
        let right = keys(&[Direction::Right]);
        for _ in 0..10 {
            advance_player(&mut player, &right);
        }
        // +0.2 per frame from 5
        assert!((player.speed - 7.0).abs() < 1e-4);
        assert_eq!(player.pos.x, PLAYER_START_X + 20.0);

        for _ in 0..200 {
            advance_player(&mut player, &right);
        }
        assert_eq!(player.speed, PLAYER_MAX_SPEED);
        assert_eq!(player.pos.x, FIELD_WIDTH / 2.0);

        // Faster vertical moves once ramped
        let y = player.pos.y;
        advance_player(&mut player, &keys(&[Direction::Up]));
        assert_eq!(player.pos.y, y - PLAYER_MAX_SPEED);
    }

    #[test]
    fn test_left_slows_to_min_speed() {
        let mut player = Player::default();
        player.speed = 6.0;
        for _ in 0..20 {
            advance_player(&mut player, &keys(&[Direction::Left]));
        }
        assert_eq!(player.speed, PLAYER_MIN_SPEED);
        assert_eq!(player.pos.x, PLAYER_START_X - 40.0);
    }

    #[test]
    fn test_latest_press_wins_on_an_axis() {
        let mut player = Player::default();
        let mut held = keys(&[Direction::Up]);
        held.press(Direction::Down);
        advance_player(&mut player, &held);
        assert_eq!(player.vel.y, PLAYER_MIN_SPEED);
        assert_eq!(player.pos.y, PLAYER_START_Y + PLAYER_MIN_SPEED);

        held.press(Direction::Up);
        advance_player(&mut player, &held);
        assert_eq!(player.pos.y, PLAYER_START_Y);
    }

    #[test]
    fn test_release_stops_axis_while_other_key_held() {
        let mut player = Player::default();
        let mut held = keys(&[Direction::Up, Direction::Down, Direction::Left]);
        // Up is still physically down, but releasing Down zeroes the axis
        held.release(Direction::Down);
        advance_player(&mut player, &held);
        assert_eq!(player.vel.y, 0.0);
        assert_eq!(player.pos.y, PLAYER_START_Y);
        // Horizontal axis untouched
        assert_eq!(player.vel.x, -PLAYER_STRAFE_SPEED);

        held.release(Direction::Right);
        advance_player(&mut player, &held);
        assert_eq!(player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_letters_scroll_and_expire() {
        let mut letters = vec![
            LetterToken::new(Vec2::new(100.0, 0.0), 'A'),
            LetterToken::new(Vec2::new(-LETTER_SIZE + 1.0, 0.0), 'B'),
        ];
        let dropped = advance_letters(&mut letters);
        assert_eq!(dropped, 1);
        assert_eq!(letters.len(), 1);
        assert_eq!(letters[0].pos.x, 100.0 - SCROLL_SPEED);
    }

    #[test]
    fn test_letter_at_left_edge_survives_until_fully_past() {
        // Right edge exactly at 0 is still on screen
        let mut letters = vec![LetterToken::new(Vec2::new(-LETTER_SIZE + SCROLL_SPEED, 0.0), 'A')];
        assert_eq!(advance_letters(&mut letters), 0);
        assert_eq!(advance_letters(&mut letters), 1);
    }

    #[test]
    fn test_first_collision_wins() {
        let player = Player::default();
        let letters = vec![
            LetterToken::new(Vec2::new(600.0, 300.0), 'X'),
            LetterToken::new(Vec2::new(110.0, 305.0), 'Y'),
            LetterToken::new(Vec2::new(120.0, 305.0), 'Z'),
        ];
        assert_eq!(detect_collision(&player, &letters), Some(1));
        assert_eq!(detect_collision(&player, &letters[..1]), None);
    }

    #[test]
    fn test_background_wraps() {
        let mut offset = -FIELD_WIDTH + SCROLL_SPEED;
        scroll_background(&mut offset, &mut []);
        assert_eq!(offset, 0.0);
        scroll_background(&mut offset, &mut []);
        assert_eq!(offset, -SCROLL_SPEED);
    }

    fn any_keys() -> impl Strategy<Value = HeldKeys> {
        let vertical = prop::option::of(prop_oneof![Just(Direction::Up), Just(Direction::Down)]);
        let horizontal =
            prop::option::of(prop_oneof![Just(Direction::Left), Just(Direction::Right)]);
        (vertical, horizontal).prop_map(|(vertical, horizontal)| HeldKeys {
            vertical,
            horizontal,
        })
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            start_x in -100.0f32..1000.0,
            start_y in -100.0f32..800.0,
            inputs in prop::collection::vec((any_keys(), 1usize..200), 1..20),
        ) {
            let mut player = Player::default();
            player.pos = Vec2::new(start_x, start_y);
            for (held, frames) in inputs {
                for _ in 0..frames {
                    advance_player(&mut player, &held);
                    prop_assert!(player.pos.y >= 0.0);
                    prop_assert!(player.pos.y <= FIELD_HEIGHT - PLAYER_HEIGHT);
                    prop_assert!(player.pos.x >= 0.0);
                    prop_assert!(player.pos.x <= FIELD_WIDTH / 2.0);
                    prop_assert!(player.speed >= PLAYER_MIN_SPEED);
                    prop_assert!(player.speed <= PLAYER_MAX_SPEED);
                }
            }
        }
    }
}
