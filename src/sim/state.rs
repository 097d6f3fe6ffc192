//! Game state and core simulation types
//!
//! The entity store: one player, a fixed AI roster that only ever shrinks,
//! and a replenished pool of collectibles.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::camera::Camera;
use crate::consts::*;
use crate::spawn_point;
use crate::tuning::{Tuning, is_spawn_extent};

/// Stable identifier for entities and collectibles
pub type EntityId = u32;

/// Player or AI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Ai,
}

/// Display size of a player at `level`
#[inline]
pub fn player_size(level: u32) -> f32 {
    PLAYER_BASE_SIZE + level as f32 * PLAYER_LEVEL_SIZE_FACTOR
}

/// Display size of an AI at `level`
#[inline]
pub fn ai_size(level: u32) -> f32 {
    AI_BASE_SIZE + level as f32 * AI_LEVEL_SIZE_FACTOR
}

/// A ball: the player or an AI opponent
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    /// Always >= 1
    pub level: u32,
    pub color: &'static str,
}

impl Entity {
    pub fn player(id: EntityId) -> Self {
        Self {
            id,
            kind: EntityKind::Player,
            pos: spawn_point(),
            level: 1,
            color: PLAYER_COLOR,
        }
    }

    pub fn ai(id: EntityId, index: usize, pos: Vec2, level: u32) -> Self {
        Self {
            id,
            kind: EntityKind::Ai,
            pos,
            level: level.max(1),
            color: if index % 2 == 0 {
                AI_COLOR_EVEN
            } else {
                AI_COLOR_ODD
            },
        }
    }

    pub fn is_player(&self) -> bool {
        self.kind == EntityKind::Player
    }

    /// Diameter, derived from level every time it is asked for
    pub fn size(&self) -> f32 {
        match self.kind {
            EntityKind::Player => player_size(self.level),
            EntityKind::Ai => ai_size(self.level),
        }
    }

    pub fn radius(&self) -> f32 {
        self.size() / 2.0
    }

    /// Back to level 1 at the spawn point
    pub fn respawn(&mut self) {
        self.level = 1;
        self.pos = spawn_point();
    }
}

/// A pickup worth one level
#[derive(Debug, Clone, PartialEq)]
pub struct Collectible {
    pub id: EntityId,
    pub pos: Vec2,
}

/// Something that happened during a tick (for logging and HUD refresh)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// A collectible was eaten by the player or an AI
    CollectibleConsumed { collectible: EntityId, by: EntityId },
    /// A batch of collectibles was added
    CollectiblesReplenished { count: usize },
    /// The player ate an AI and gained its level
    AiAbsorbed { ai: EntityId, gained: u32 },
    /// A higher-level AI caught the player
    PlayerDefeated { by: EntityId },
}

/// Complete game state (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// The single player entity
    pub player: Entity,
    /// AI roster in spawn order
    pub ais: Vec<Entity>,
    /// Live collectibles
    pub collectibles: Vec<Collectible>,
    /// Viewport offset, recomputed every tick
    pub camera: Camera,
    rng: Pcg32,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Create an empty arena: player at spawn, no opponents, no collectibles
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            time_ticks: 0,
            player: Entity::player(0),
            ais: Vec::new(),
            collectibles: Vec::new(),
            camera: Camera::default(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 0,
        };
        state.player.id = state.next_entity_id();
        state.camera.follow(state.player.pos);
        state
    }

    /// Create a fully populated arena
    pub fn with_tuning(seed: u64, tuning: &Tuning) -> Self {
        let mut state = Self::new(seed);
        state.initialize(tuning.ai_count, tuning.initial_collectibles, tuning);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Populate the AI roster and the initial collectibles
    pub fn initialize(&mut self, ai_count: usize, collectible_count: usize, tuning: &Tuning) {
        self.ais.clear();
        self.collectibles.clear();

        let ai_extent = tuning.ai_spawn_half_extent;
        for index in 0..ai_count {
            let pos = self.random_position(ai_extent);
            let level = self
                .rng
                .random_range(tuning.ai_min_level..=tuning.ai_max_level);
            let id = self.next_entity_id();
            self.ais.push(Entity::ai(id, index, pos, level));
        }

        self.spawn_collectibles(collectible_count, tuning.collectible_spawn_half_extent);

        log::info!(
            "Arena populated: {} opponents, {} collectibles",
            self.ais.len(),
            self.collectibles.len()
        );
    }

    /// Append one batch of collectibles if the live count is under the floor.
    /// Returns how many were added.
    pub fn replenish(&mut self, tuning: &Tuning) -> usize {
        if self.collectibles.len() >= tuning.collectible_floor {
            return 0;
        }
        self.spawn_collectibles(tuning.replenish_batch, tuning.collectible_spawn_half_extent);
        tuning.replenish_batch
    }

    /// Add an AI at a known position (roster order = call order)
    pub fn spawn_ai(&mut self, pos: Vec2, level: u32) -> EntityId {
        let id = self.next_entity_id();
        let index = self.ais.len();
        self.ais.push(Entity::ai(id, index, pos, level));
        id
    }

    /// Add a collectible at a known position
    pub fn spawn_collectible(&mut self, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.collectibles.push(Collectible { id, pos });
        id
    }

    fn spawn_collectibles(&mut self, count: usize, half_extent: f32) {
        self.collectibles.reserve(count);
        for _ in 0..count {
            let pos = self.random_position(half_extent);
            self.spawn_collectible(pos);
        }
    }

    fn random_position(&mut self, half_extent: f32) -> Vec2 {
        if half_extent <= 0.0 || !is_spawn_extent(half_extent) {
            return Vec2::ZERO;
        }
        Vec2::new(
            self.rng.random_range(-half_extent..half_extent),
            self.rng.random_range(-half_extent..half_extent),
        )
    }

    /// Find an AI by id
    pub fn ai(&self, id: EntityId) -> Option<&Entity> {
        self.ais.iter().find(|ai| ai.id == id)
    }
}
