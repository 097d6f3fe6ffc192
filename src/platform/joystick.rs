//! Virtual joystick geometry
//!
//! A round base with a draggable knob. Pointer positions are turned into a
//! vector whose length never exceeds 1; releasing the drag reports a stop
//! exactly once.

use glam::Vec2;

/// Diameter of the joystick base (CSS pixels)
pub const JOYSTICK_SIZE: f32 = 120.0;
/// Diameter of the knob
pub const KNOB_SIZE: f32 = 40.0;
/// How far the knob center may travel from the base center
pub const MAX_KNOB_TRAVEL: f32 = (JOYSTICK_SIZE - KNOB_SIZE) / 2.0;

/// Drag state for one joystick
#[derive(Debug, Clone, Default)]
pub struct VirtualJoystick {
    /// Base center in client coordinates
    center: Vec2,
    dragging: bool,
    /// Knob offset from center, already clamped
    knob: Vec2,
}

impl VirtualJoystick {
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            ..Default::default()
        }
    }

    /// Update the base center (layout changed)
    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Knob offset from the base center
    pub fn knob_offset(&self) -> Vec2 {
        self.knob
    }

    /// Pointer/touch pressed on the base. Returns the vector to report.
    pub fn begin(&mut self, pointer: Vec2) -> Vec2 {
        self.dragging = true;
        self.update_knob(pointer)
    }

    /// Pointer moved. Returns `None` when no drag is in progress.
    pub fn drag(&mut self, pointer: Vec2) -> Option<Vec2> {
        if !self.dragging {
            return None;
        }
        Some(self.update_knob(pointer))
    }

    /// Pointer released. Returns `true` only for the release that ends a drag.
    pub fn end(&mut self) -> bool {
        if !self.dragging {
            return false;
        }
        self.dragging = false;
        self.knob = Vec2::ZERO;
        true
    }

    fn update_knob(&mut self, pointer: Vec2) -> Vec2 {
        let delta = pointer - self.center;
        self.knob = delta.clamp_length_max(MAX_KNOB_TRAVEL);
        self.knob / MAX_KNOB_TRAVEL
    }
}
