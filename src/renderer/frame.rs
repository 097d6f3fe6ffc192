//! Frame rendering
//!
//! Back to front: background, grid, collectibles, AI, player. Everything is
//! drawn relative to the camera offset; rendering never mutates game state.

use glam::Vec2;

use super::Surface;
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Camera, Entity, GameState};
use crate::viewport_size;

/// Draw one complete frame
pub fn render_frame<S: Surface + ?Sized>(surface: &mut S, state: &GameState, settings: &Settings) {
    let camera = &state.camera;

    surface.fill_rect(Vec2::ZERO, viewport_size(), BACKGROUND_COLOR);

    if settings.show_grid {
        draw_grid(surface, camera);
    }

    for c in &state.collectibles {
        let screen = camera.world_to_screen(c.pos);
        if in_view(screen, COLLECTIBLE_CULL_MARGIN) {
            surface.fill_circle(screen, COLLECTIBLE_RADIUS, COLLECTIBLE_COLOR);
        }
    }

    for ai in &state.ais {
        let screen = camera.world_to_screen(ai.pos);
        if in_view(screen, ai.size()) {
            draw_ball(surface, ai, screen, settings);
        }
    }

    // The player is always on screen
    let screen = camera.world_to_screen(state.player.pos);
    draw_ball(surface, &state.player, screen, settings);
}

/// Whether a viewport point lies within `margin` of the visible area
#[inline]
pub fn in_view(screen: Vec2, margin: f32) -> bool {
    screen.x > -margin
        && screen.x < VIEWPORT_WIDTH + margin
        && screen.y > -margin
        && screen.y < VIEWPORT_HEIGHT + margin
}

/// Grid lines aligned to world-space multiples of `GRID_CELL`
fn draw_grid<S: Surface + ?Sized>(surface: &mut S, camera: &Camera) {
    let mut x = -camera.offset.x % GRID_CELL;
    while x < VIEWPORT_WIDTH {
        surface.line(
            Vec2::new(x, 0.0),
            Vec2::new(x, VIEWPORT_HEIGHT),
            GRID_COLOR,
            1.0,
        );
        x += GRID_CELL;
    }

    let mut y = -camera.offset.y % GRID_CELL;
    while y < VIEWPORT_HEIGHT {
        surface.line(
            Vec2::new(0.0, y),
            Vec2::new(VIEWPORT_WIDTH, y),
            GRID_COLOR,
            1.0,
        );
        y += GRID_CELL;
    }
}

fn draw_ball<S: Surface + ?Sized>(surface: &mut S, entity: &Entity, screen: Vec2, settings: &Settings) {
    surface.fill_circle(screen, entity.radius(), entity.color);

    let (font, offset_y) = if entity.is_player() {
        surface.stroke_circle(
            screen,
            entity.radius(),
            PLAYER_OUTLINE_COLOR,
            PLAYER_OUTLINE_WIDTH,
        );
        (PLAYER_LABEL_FONT, PLAYER_LABEL_OFFSET_Y)
    } else {
        (AI_LABEL_FONT, AI_LABEL_OFFSET_Y)
    };

    if settings.show_levels {
        surface.fill_text(
            &entity.level.to_string(),
            screen + Vec2::new(0.0, offset_y),
            font,
            LABEL_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, DrawList};
    use crate::tuning::Tuning;

    fn render(state: &GameState) -> DrawList {
        let mut list = DrawList::new();
        render_frame(&mut list, state, &Settings::default());
        list
    }

    #[test]
    fn test_background_first_player_last() {
        let state = GameState::with_tuning(5, &Tuning::default());
        let list = render(&state);

        assert!(matches!(
            list.commands.first(),
            Some(DrawCommand::FillRect { color, .. }) if color == BACKGROUND_COLOR
        ));
        // Player: fill, outline, label
        let n = list.len();
        assert!(matches!(
            &list.commands[n - 3],
            DrawCommand::FillCircle { color, center, .. }
                if color == PLAYER_COLOR && *center == Vec2::new(400.0, 300.0)
        ));
        assert!(matches!(&list.commands[n - 2], DrawCommand::StrokeCircle { .. }));
        assert!(matches!(
            &list.commands[n - 1],
            DrawCommand::Text { text, pos, .. } if text == "1" && *pos == Vec2::new(400.0, 305.0)
        ));
    }

    #[test]
    fn test_z_order_collectibles_before_ai() {
        let mut state = GameState::new(1);
        state.spawn_ai(Vec2::new(300.0, 300.0), 2);
        state.spawn_collectible(Vec2::new(500.0, 300.0));
        let list = render(&state);

        let first_collectible = list
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::FillCircle { color, .. } if color == COLLECTIBLE_COLOR))
            .unwrap();
        let first_ai = list
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::FillCircle { color, .. } if color == AI_COLOR_EVEN))
            .unwrap();
        let last_grid = list
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Line { .. }))
            .unwrap();
        assert!(last_grid < first_collectible);
        assert!(first_collectible < first_ai);
    }

    #[test]
    fn test_offscreen_entities_culled() {
        let mut state = GameState::new(1);
        // Camera offset is (0, 0) with the player at spawn
        state.spawn_collectible(Vec2::new(805.0, 300.0));
        state.spawn_collectible(Vec2::new(815.0, 300.0));
        // Level 4 AI has size 18, which is also its cull margin
        state.spawn_ai(Vec2::new(-15.0, 300.0), 4);
        state.spawn_ai(Vec2::new(-20.0, 300.0), 4);
        let list = render(&state);

        let collectibles: Vec<_> = list.circles_with_color(COLLECTIBLE_COLOR).collect();
        assert_eq!(collectibles, vec![Vec2::new(805.0, 300.0)]);
        let ais: Vec<_> = list.circles_with_color(AI_COLOR_EVEN).collect();
        assert_eq!(ais, vec![Vec2::new(-15.0, 300.0)]);
        assert_eq!(list.circles_with_color(AI_COLOR_ODD).count(), 0);
    }

    #[test]
    fn test_positions_are_camera_relative() {
        let mut state = GameState::new(1);
        state.player.pos = Vec2::new(1000.0, -1000.0);
        state.camera.follow(state.player.pos);
        state.spawn_collectible(Vec2::new(1010.0, -990.0));
        let list = render(&state);

        let dots: Vec<_> = list.circles_with_color(COLLECTIBLE_COLOR).collect();
        assert_eq!(dots, vec![Vec2::new(410.0, 310.0)]);
        assert_eq!(
            list.circles_with_color(PLAYER_COLOR).collect::<Vec<_>>(),
            vec![Vec2::new(400.0, 300.0)]
        );
    }

    #[test]
    fn test_grid_follows_camera_modulo_cell() {
        let mut state = GameState::new(1);
        state.camera.offset = Vec2::new(120.0, 30.0);
        let list = render(&state);

        let verticals: Vec<f32> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, .. } if from.x == to.x => Some(from.x),
                _ => None,
            })
            .collect();
        assert_eq!(verticals.first(), Some(&-20.0));
        assert_eq!(verticals.len(), 17);
        assert!(verticals.windows(2).all(|w| w[1] - w[0] == GRID_CELL));
    }

    #[test]
    fn test_levels_labelled() {
        let mut state = GameState::new(1);
        state.player.level = 12;
        state.spawn_ai(Vec2::new(420.0, 280.0), 7);
        let list = render(&state);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["7", "12"]);

        let mut quiet = DrawList::new();
        let settings = Settings {
            show_levels: false,
            show_grid: false,
            ..Default::default()
        };
        render_frame(&mut quiet, &state, &settings);
        assert_eq!(quiet.texts().count(), 0);
        assert!(!quiet.commands.iter().any(|c| matches!(c, DrawCommand::Line { .. })));
    }

    #[test]
    fn test_render_is_idempotent() {
        let state = GameState::with_tuning(31337, &Tuning::default());
        let before = state.clone();

        let first = render(&state);
        let second = render(&state);

        assert_eq!(first, second);
        assert_eq!(state.player, before.player);
        assert_eq!(state.ais, before.ais);
        assert_eq!(state.collectibles, before.collectibles);
        assert_eq!(state.camera, before.camera);
    }
}
