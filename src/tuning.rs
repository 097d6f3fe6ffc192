//! Data-driven game balance
//!
//! Every knob defaults to the shipped balance. A JSON object may override
//! any subset of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Per-axis keyboard displacement per frame
    pub player_speed: f32,
    /// Joystick displacement multiplier on top of `player_speed`
    pub joystick_boost: f32,
    /// Per-axis joystick magnitude at or below which input is ignored
    pub joystick_deadzone: f32,

    // === AI ===
    /// Distance an AI moves toward its target each frame
    pub ai_speed: f32,
    /// Number of AI opponents created at start
    pub ai_count: usize,
    /// AI spawn square is [-extent, extent) on both axes
    pub ai_spawn_half_extent: f32,
    /// Inclusive range of initial AI levels
    pub ai_min_level: u32,
    pub ai_max_level: u32,

    // === Collectibles ===
    /// Collectibles created at start
    pub initial_collectibles: usize,
    /// Collectible spawn square is [-extent, extent) on both axes
    pub collectible_spawn_half_extent: f32,
    /// Live count below which a batch is added
    pub collectible_floor: usize,
    /// Collectibles added per replenishment
    pub replenish_batch: usize,
    /// Added to half the consumer's size to get the pickup distance
    pub pickup_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 3.0,
            joystick_boost: 1.5,
            joystick_deadzone: 0.1,

            ai_speed: 1.5,
            ai_count: 8,
            ai_spawn_half_extent: 1000.0,
            ai_min_level: 1,
            ai_max_level: 5,

            initial_collectibles: 200,
            collectible_spawn_half_extent: 1500.0,
            collectible_floor: 100,
            replenish_batch: 20,
            pickup_radius: 3.0,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut tuning: Self = serde_json::from_str(json)?;
        tuning.sanitize();
        Ok(tuning)
    }

    /// Keep ranges usable (swapped level bounds, zero level, non-finite or
    /// negative distances). Bad distances fall back to their defaults.
    fn sanitize(&mut self) {
        self.ai_min_level = self.ai_min_level.max(1);
        if self.ai_max_level < self.ai_min_level {
            std::mem::swap(&mut self.ai_min_level, &mut self.ai_max_level);
            self.ai_min_level = self.ai_min_level.max(1);
        }

        let defaults = Self::default();
        for (value, default) in [
            (&mut self.player_speed, defaults.player_speed),
            (&mut self.joystick_boost, defaults.joystick_boost),
            (&mut self.joystick_deadzone, defaults.joystick_deadzone),
            (&mut self.ai_speed, defaults.ai_speed),
            (&mut self.pickup_radius, defaults.pickup_radius),
        ] {
            if !value.is_finite() || *value < 0.0 {
                log::warn!("Tuning value {} out of range, using {}", value, default);
                *value = default;
            }
        }

        for (value, default) in [
            (&mut self.ai_spawn_half_extent, defaults.ai_spawn_half_extent),
            (
                &mut self.collectible_spawn_half_extent,
                defaults.collectible_spawn_half_extent,
            ),
        ] {
            if !is_spawn_extent(*value) {
                log::warn!("Spawn extent {} out of range, using {}", value, default);
                *value = default;
            }
        }
    }

    /// Load tuning from the page's `<script id="tuning">` block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("tuning"))
            .and_then(|el| el.text_content());

        match text {
            Some(json) if !json.trim().is_empty() => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring invalid tuning JSON: {}", e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

/// Whether `[-extent, extent)` is a range floats can be sampled from
pub fn is_spawn_extent(extent: f32) -> bool {
    extent >= 0.0 && (extent * 2.0).is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "ai_count": 3, "player_speed": 4.0 }"#).unwrap();
        assert_eq!(tuning.ai_count, 3);
        assert_eq!(tuning.player_speed, 4.0);
        assert_eq!(tuning.collectible_floor, 100);
        assert_eq!(tuning.replenish_batch, 20);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Tuning::from_json("{}").unwrap(), Tuning::default());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Tuning::from_json("{ ai_count: }").is_err());
        assert!(Tuning::from_json(r#"{ "ai_count": "many" }"#).is_err());
    }

    #[test]
    fn test_level_range_sanitized() {
        let tuning = Tuning::from_json(r#"{ "ai_min_level": 6, "ai_max_level": 2 }"#).unwrap();
        assert_eq!(tuning.ai_min_level, 2);
        assert_eq!(tuning.ai_max_level, 6);

        let tuning = Tuning::from_json(r#"{ "ai_min_level": 0, "ai_max_level": 0 }"#).unwrap();
        assert_eq!(tuning.ai_min_level, 1);
        assert_eq!(tuning.ai_max_level, 1);
    }

    #[test]
    fn test_overflowing_extent_falls_back_to_default() {
        let tuning = Tuning::from_json(r#"{ "collectible_spawn_half_extent": 1e39 }"#).unwrap();
        assert_eq!(tuning.collectible_spawn_half_extent, 1500.0);

        let tuning = Tuning::from_json(r#"{ "ai_spawn_half_extent": 3e38 }"#).unwrap();
        assert_eq!(tuning.ai_spawn_half_extent, 1000.0);
    }

    #[test]
    fn test_negative_distances_fall_back_to_default() {
        let tuning = Tuning::from_json(
            r#"{ "player_speed": -2.0, "pickup_radius": -1.0, "ai_spawn_half_extent": -10.0 }"#,
        )
        .unwrap();
        assert_eq!(tuning.player_speed, 3.0);
        assert_eq!(tuning.pickup_radius, 3.0);
        assert_eq!(tuning.ai_spawn_half_extent, 1000.0);
    }

    #[test]
    fn test_zero_extent_is_kept() {
        let tuning = Tuning::from_json(r#"{ "ai_spawn_half_extent": 0.0 }"#).unwrap();
        assert_eq!(tuning.ai_spawn_half_extent, 0.0);
        assert!(is_spawn_extent(0.0));
        assert!(!is_spawn_extent(f32::INFINITY));
        assert!(!is_spawn_extent(f32::NAN));
    }
}
