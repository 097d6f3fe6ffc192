//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per displayed frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (roster / spawn order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod input;
pub mod movement;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{can_pick_up, overlaps, resolve_absorptions, resolve_pickups};
pub use input::{Direction, InputState, TickInput};
pub use movement::{move_ais, move_player, nearest_collectible, step_ai};
pub use state::{
    Collectible, Entity, EntityId, EntityKind, GameEvent, GameState, ai_size, player_size,
};
pub use tick::tick;
