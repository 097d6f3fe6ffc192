//! Pixel Ball Arena - grow by eating pixels and smaller rivals
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, entity store)
//! - `renderer`: 2D raster rendering behind a `Surface` trait
//! - `game`: Frame driver (start gate, per-frame tick + render)
//! - `platform`: Browser input helpers (virtual joystick)
//! - `tuning`: Data-driven game balance
//! - `settings`: Display preferences

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Game, GamePhase};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical render surface size
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Background grid cell size (world units)
    pub const GRID_CELL: f32 = 50.0;

    /// Where the player starts, and where it returns after being absorbed
    pub const SPAWN_X: f32 = 400.0;
    pub const SPAWN_Y: f32 = 300.0;

    /// Player size = base + level * factor
    pub const PLAYER_BASE_SIZE: f32 = 15.0;
    pub const PLAYER_LEVEL_SIZE_FACTOR: f32 = 2.0;

    /// AI size = base + level * factor
    pub const AI_BASE_SIZE: f32 = 12.0;
    pub const AI_LEVEL_SIZE_FACTOR: f32 = 1.5;

    /// Collectibles are drawn as small dots
    pub const COLLECTIBLE_RADIUS: f32 = 3.0;
    /// Collectibles this far outside the viewport are still drawn
    pub const COLLECTIBLE_CULL_MARGIN: f32 = 10.0;

    /// Palette
    pub const PLAYER_COLOR: &str = "#FF6B35";
    pub const AI_COLOR_EVEN: &str = "#5DADE2";
    pub const AI_COLOR_ODD: &str = "#2C3E50";
    pub const COLLECTIBLE_COLOR: &str = "#FFD700";
    pub const BACKGROUND_COLOR: &str = "#1a1a2e";
    pub const GRID_COLOR: &str = "#16213e";
    pub const LABEL_COLOR: &str = "#FFFFFF";
    pub const PLAYER_OUTLINE_COLOR: &str = "#FFFFFF";
    pub const PLAYER_OUTLINE_WIDTH: f32 = 2.0;

    /// Level labels
    pub const AI_LABEL_FONT: &str = "12px Orbitron";
    pub const PLAYER_LABEL_FONT: &str = "14px Orbitron";
    /// Baseline nudge so digits look vertically centered
    pub const AI_LABEL_OFFSET_Y: f32 = 4.0;
    pub const PLAYER_LABEL_OFFSET_Y: f32 = 5.0;
}

/// Player spawn point
#[inline]
pub fn spawn_point() -> Vec2 {
    Vec2::new(consts::SPAWN_X, consts::SPAWN_Y)
}

/// Viewport dimensions as a vector
#[inline]
pub fn viewport_size() -> Vec2 {
    Vec2::new(consts::VIEWPORT_WIDTH, consts::VIEWPORT_HEIGHT)
}
