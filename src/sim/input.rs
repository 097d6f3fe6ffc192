//! Input aggregation
//!
//! Keyboard and joystick state is collected by the platform layer into an
//! `InputState`, then frozen once per tick into a `TickInput` snapshot that
//! the simulation consumes.

use std::collections::HashSet;

use glam::Vec2;

use crate::tuning::Tuning;

/// Logical movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a lowercased key name to a direction.
    /// Covers WASD, arrows, and the same physical keys on a Russian layout.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "w" | "arrowup" | "ц" => Some(Direction::Up),
            "s" | "arrowdown" | "ы" => Some(Direction::Down),
            "a" | "arrowleft" | "ф" => Some(Direction::Left),
            "d" | "arrowright" | "в" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Live input, mutated by event handlers between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Currently held keys, lowercased
    held: HashSet<String>,
    /// Last joystick vector, zero when released
    joystick: Vec2,
}

impl InputState {
    pub fn key_down(&mut self, key: &str) {
        self.held.insert(key.to_lowercase());
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(&key.to_lowercase());
    }

    /// Joystick drag update, components in [-1, 1]
    pub fn joystick_move(&mut self, x: f32, y: f32) {
        self.joystick = Vec2::new(x, y);
    }

    /// Joystick released
    pub fn joystick_stop(&mut self) {
        self.joystick = Vec2::ZERO;
    }

    /// Forget everything (window blur, restart)
    pub fn clear(&mut self) {
        self.held.clear();
        self.joystick = Vec2::ZERO;
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(&key.to_lowercase())
    }

    fn direction_held(&self, dir: Direction) -> bool {
        self.held
            .iter()
            .any(|key| Direction::from_key(key) == Some(dir))
    }

    /// Freeze the current state for one tick
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            up: self.direction_held(Direction::Up),
            down: self.direction_held(Direction::Down),
            left: self.direction_held(Direction::Left),
            right: self.direction_held(Direction::Right),
            joystick: self.joystick,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Joystick vector in [-1, 1]^2 (zero when idle)
    pub joystick: Vec2,
}

impl TickInput {
    /// Player displacement for this tick.
    ///
    /// Each held direction contributes `±player_speed` on its axis, so
    /// opposite keys cancel. The joystick adds on top when either axis is
    /// past the deadzone.
    pub fn movement_delta(&self, tuning: &Tuning) -> Vec2 {
        let speed = tuning.player_speed;
        let mut delta = Vec2::ZERO;

        if self.up {
            delta.y -= speed;
        }
        if self.down {
            delta.y += speed;
        }
        if self.left {
            delta.x -= speed;
        }
        if self.right {
            delta.x += speed;
        }

        let deadzone = tuning.joystick_deadzone;
        if self.joystick.x.abs() > deadzone || self.joystick.y.abs() > deadzone {
            delta += self.joystick * speed * tuning.joystick_boost;
        }

        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_key_mapping_includes_layout_variants() {
        assert_eq!(Direction::from_key("w"), Some(Direction::Up));
        assert_eq!(Direction::from_key("ц"), Some(Direction::Up));
        assert_eq!(Direction::from_key("arrowdown"), Some(Direction::Down));
        assert_eq!(Direction::from_key("ы"), Some(Direction::Down));
        assert_eq!(Direction::from_key("ф"), Some(Direction::Left));
        assert_eq!(Direction::from_key("в"), Some(Direction::Right));
        assert_eq!(Direction::from_key("q"), None);
    }

    #[test]
    fn test_keys_are_lowercased() {
        let mut input = InputState::default();
        input.key_down("ArrowUp");
        input.key_down("D");
        assert!(input.is_held("arrowup"));
        let snap = input.snapshot();
        assert!(snap.up && snap.right);
        assert!(!snap.down && !snap.left);

        input.key_up("arrowup");
        assert!(!input.snapshot().up);
    }

    #[test]
    fn test_keyboard_delta() {
        let tuning = Tuning::default();
        let mut input = InputState::default();
        input.key_down("w");
        input.key_down("d");
        assert_eq!(input.snapshot().movement_delta(&tuning), Vec2::new(3.0, -3.0));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let tuning = Tuning::default();
        let mut input = InputState::default();
        input.key_down("a");
        input.key_down("arrowright");
        input.key_down("w");
        input.key_down("s");
        assert_eq!(input.snapshot().movement_delta(&tuning), Vec2::ZERO);
    }

    #[test]
    fn test_duplicate_direction_keys_count_once() {
        let tuning = Tuning::default();
        let mut input = InputState::default();
        input.key_down("w");
        input.key_down("arrowup");
        assert_eq!(input.snapshot().movement_delta(&tuning), Vec2::new(0.0, -3.0));
    }

    #[test]
    fn test_joystick_inside_deadzone_ignored() {
        let tuning = Tuning::default();
        let input = TickInput {
            joystick: Vec2::new(0.05, 0.05),
            ..Default::default()
        };
        assert_eq!(input.movement_delta(&tuning), Vec2::ZERO);
    }

    #[test]
    fn test_joystick_full_x() {
        let tuning = Tuning::default();
        let input = TickInput {
            joystick: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        assert_eq!(
            input.movement_delta(&tuning),
            Vec2::new(tuning.player_speed * tuning.joystick_boost, 0.0)
        );
    }

    #[test]
    fn test_keyboard_and_joystick_add() {
        let tuning = Tuning::default();
        let input = TickInput {
            right: true,
            joystick: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        assert_eq!(input.movement_delta(&tuning), Vec2::new(3.0 + 4.5, 0.0));
    }

    #[test]
    fn test_joystick_stop_zeroes_vector() {
        let tuning = Tuning::default();
        let mut input = InputState::default();
        input.joystick_move(0.0, -1.0);
        assert_eq!(input.snapshot().movement_delta(&tuning), Vec2::new(0.0, -4.5));
        input.joystick_stop();
        assert_eq!(input.snapshot().movement_delta(&tuning), Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_deadzone_contributes_nothing(x in -0.1f32..=0.1, y in -0.1f32..=0.1) {
            let tuning = Tuning::default();
            let input = TickInput { joystick: Vec2::new(x, y), ..Default::default() };
            prop_assert_eq!(input.movement_delta(&tuning), Vec2::ZERO);
        }

        #[test]
        fn prop_joystick_past_deadzone_scales(x in 0.11f32..=1.0) {
            let tuning = Tuning::default();
            let input = TickInput { joystick: Vec2::new(x, 0.0), ..Default::default() };
            let delta = input.movement_delta(&tuning);
            prop_assert_eq!(delta, Vec2::new(x * 3.0 * 1.5, 0.0));
        }
    }
}
