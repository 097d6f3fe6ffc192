//! Proximity collision resolution
//!
//! Two passes, in this order:
//! 1. Collectibles: eaten by the player first, otherwise by the first AI in
//!    roster order that reaches it. Each pickup is worth one level.
//! 2. Player vs AI: on overlap the higher level wins. A smaller AI is removed
//!    and its level added to the player; a bigger AI sends the player back to
//!    spawn at level 1 and survives. Equal levels do nothing.

use std::cmp::Ordering;

use glam::Vec2;

use super::state::{Entity, GameEvent, GameState};
use crate::tuning::Tuning;

/// Whether `entity` is close enough to eat a collectible at `pos`
#[inline]
pub fn can_pick_up(entity: &Entity, pos: Vec2, pickup_radius: f32) -> bool {
    entity.pos.distance(pos) < entity.radius() + pickup_radius
}

/// Whether two balls overlap
#[inline]
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    a.pos.distance(b.pos) < (a.size() + b.size()) / 2.0
}

/// Pass A: collectible pickups, then replenish if the pool ran low.
///
/// Reach is measured from the sizes at the start of the pass, so a pickup
/// does not extend the eater's reach until the next tick.
pub fn resolve_pickups(state: &mut GameState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let player_at_start = state.player.clone();
    let ais_at_start = state.ais.clone();
    let player = &mut state.player;
    let ais = &mut state.ais;

    state.collectibles.retain(|c| {
        if can_pick_up(&player_at_start, c.pos, tuning.pickup_radius) {
            player.level += 1;
            events.push(GameEvent::CollectibleConsumed {
                collectible: c.id,
                by: player.id,
            });
            return false;
        }

        if let Some(index) = ais_at_start
            .iter()
            .position(|ai| can_pick_up(ai, c.pos, tuning.pickup_radius))
        {
            let ai = &mut ais[index];
            ai.level += 1;
            events.push(GameEvent::CollectibleConsumed {
                collectible: c.id,
                by: ai.id,
            });
            return false;
        }

        true
    });

    let added = state.replenish(tuning);
    if added > 0 {
        log::debug!(
            "Replenished {} collectibles ({} live)",
            added,
            state.collectibles.len()
        );
        events.push(GameEvent::CollectiblesReplenished { count: added });
    }
}

/// Pass B: player/AI absorption.
///
/// Every AI is compared against the player as it was when the pass began.
/// The outcomes are applied to the live player in roster order, so a defeat
/// after an absorption still ends at level 1 on the spawn point.
pub fn resolve_absorptions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player_at_start = state.player.clone();
    let player = &mut state.player;

    state.ais.retain(|ai| {
        if !overlaps(&player_at_start, ai) {
            return true;
        }
        match player_at_start.level.cmp(&ai.level) {
            Ordering::Greater => {
                player.level += ai.level;
                log::debug!(
                    "Absorbed AI {} (+{}), player level {}",
                    ai.id,
                    ai.level,
                    player.level
                );
                events.push(GameEvent::AiAbsorbed {
                    ai: ai.id,
                    gained: ai.level,
                });
                false
            }
            Ordering::Less => {
                log::debug!(
                    "Player (level {}) absorbed by AI {} (level {})",
                    player_at_start.level,
                    ai.id,
                    ai.level
                );
                player.respawn();
                events.push(GameEvent::PlayerDefeated { by: ai.id });
                true
            }
            Ordering::Equal => true,
        }
    });
}
