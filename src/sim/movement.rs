//! Per-tick movement for the player and the chase AI

use glam::Vec2;

use super::input::TickInput;
use super::state::{Collectible, Entity, GameState};
use crate::tuning::Tuning;

/// Apply the input snapshot to the player's position
pub fn move_player(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    state.player.pos += input.movement_delta(tuning);
}

/// Nearest collectible to `from`. Ties go to the first one encountered.
pub fn nearest_collectible(from: Vec2, collectibles: &[Collectible]) -> Option<&Collectible> {
    let mut best: Option<(&Collectible, f32)> = None;
    for c in collectibles {
        let dist = from.distance(c.pos);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((c, dist)),
        }
    }
    best.map(|(c, _)| c)
}

/// Step one AI toward its nearest collectible.
///
/// The target is re-picked every tick. With nothing to chase, or when already
/// sitting on the target, the AI stays put.
pub fn step_ai(ai: &mut Entity, collectibles: &[Collectible], speed: f32) {
    let Some(target) = nearest_collectible(ai.pos, collectibles) else {
        return;
    };
    let to_target = target.pos - ai.pos;
    let distance = to_target.length();
    if distance > 0.0 {
        ai.pos += to_target / distance * speed;
    }
}

/// Move every AI one step
pub fn move_ais(state: &mut GameState, tuning: &Tuning) {
    let collectibles = &state.collectibles;
    for ai in &mut state.ais {
        step_ai(ai, collectibles, tuning.ai_speed);
    }
}
