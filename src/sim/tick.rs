//! One simulation step
//!
//! Player movement, AI movement, pickups, absorption, then the camera snaps
//! to the player. Each step runs to completion before the next one starts.

use super::collision::{resolve_absorptions, resolve_pickups};
use super::input::TickInput;
use super::movement::{move_ais, move_player};
use super::state::{GameEvent, GameState};
use crate::tuning::Tuning;

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) -> Vec<GameEvent> {
    let mut events = Vec::new();

    state.time_ticks += 1;

    move_player(state, input, tuning);
    move_ais(state, tuning);

    resolve_pickups(state, tuning, &mut events);
    resolve_absorptions(state, &mut events);

    state.camera.follow(state.player.pos);

    events
}
