//! Viewport tracking
//!
//! The camera is a plain offset: world position minus half the viewport,
//! snapped to the player every tick with no smoothing.

use glam::Vec2;

use crate::viewport_size;

/// Top-left corner of the viewport in world space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub offset: Vec2,
}

impl Camera {
    /// Center the viewport on `target`
    pub fn follow(&mut self, target: Vec2) {
        self.offset = target - viewport_size() / 2.0;
    }

    /// World coordinates to viewport coordinates
    #[inline]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_centers_target() {
        let mut camera = Camera::default();
        camera.follow(Vec2::new(400.0, 300.0));
        assert_eq!(camera.offset, Vec2::ZERO);

        camera.follow(Vec2::new(-100.0, 50.0));
        assert_eq!(camera.offset, Vec2::new(-500.0, -250.0));
        assert_eq!(
            camera.world_to_screen(Vec2::new(-100.0, 50.0)),
            Vec2::new(400.0, 300.0)
        );
    }
}
