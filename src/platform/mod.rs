//! Platform abstraction layer
//!
//! Browser-facing input helpers that are still plain Rust:
//! - Virtual joystick drag geometry
//! - Keyboard event filtering
//! - Frame loop lifecycle across page hide/show

pub mod joystick;

pub use joystick::VirtualJoystick;

use crate::sim::Direction;

/// Whether a key event should be swallowed so the page doesn't scroll
pub fn is_movement_key(key: &str) -> bool {
    Direction::from_key(&key.to_lowercase()).is_some()
}

/// Frame loop state as seen from `pagehide`/`pageshow`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopStatus {
    pub running: bool,
    pub frame_pending: bool,
    pub torn_down: bool,
}

/// Whether hiding the page ends the loop for good. A page kept in the
/// back/forward cache (`persisted`) only pauses.
pub fn hide_stops_loop(persisted: bool) -> bool {
    !persisted
}

/// Whether showing the page should schedule a frame again
pub fn show_resumes_loop(persisted: bool, status: LoopStatus) -> bool {
    persisted && status.running && !status.torn_down && !status.frame_pending
}
