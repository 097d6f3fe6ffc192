//! Frame driver
//!
//! Owns everything a running session needs and exposes one `frame()` call for
//! whatever schedules frames: `requestAnimationFrame` in the browser, a plain
//! loop natively, or a test.

use crate::renderer::{Surface, render_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, InputState, tick};
use crate::tuning::Tuning;

/// Driver lifecycle. There is no way back from `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Menu is showing, nothing simulates
    NotStarted,
    /// One tick + render per frame
    Running,
}

/// Game instance holding all state
pub struct Game {
    phase: GamePhase,
    state: GameState,
    /// Live input, fed by event handlers
    pub input: InputState,
    pub tuning: Tuning,
    pub settings: Settings,
}

impl Game {
    pub fn new(tuning: Tuning, settings: Settings) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            state: GameState::new(0),
            input: InputState::default(),
            tuning,
            settings,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state access (for setting up scenarios)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Populate the arena and begin simulating. Later calls are ignored.
    pub fn start(&mut self, seed: u64) -> bool {
        if self.phase == GamePhase::Running {
            log::warn!("Start requested while already running");
            return false;
        }
        self.state = GameState::with_tuning(seed, &self.tuning);
        self.phase = GamePhase::Running;
        log::info!("Game started with seed: {}", seed);
        true
    }

    /// Run one frame: snapshot input, tick, render.
    ///
    /// Does nothing before `start`. A missing surface only skips drawing.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: Option<&mut S>) -> Vec<GameEvent> {
        if self.phase != GamePhase::Running {
            return Vec::new();
        }

        let input = self.input.snapshot();
        let events = tick(&mut self.state, &input, &self.tuning);

        for event in &events {
            if let GameEvent::PlayerDefeated { by } = event {
                log::info!("Player absorbed by opponent {}, respawning", by);
            }
        }

        match surface {
            Some(surface) => render_frame(surface, &self.state, &self.settings),
            None => log::trace!("No render surface, skipping draw"),
        }

        events
    }

    /// Draw the current state without advancing it
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        render_frame(surface, &self.state, &self.settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use crate::spawn_point;
    use glam::Vec2;

    fn game() -> Game {
        Game::new(Tuning::default(), Settings::default())
    }

    #[test]
    fn test_frames_before_start_do_nothing() {
        let mut game = game();
        game.input.key_down("d");
        let mut list = DrawList::new();

        let events = game.frame(Some(&mut list));

        assert!(events.is_empty());
        assert!(list.is_empty());
        assert_eq!(game.state().time_ticks, 0);
        assert_eq!(game.state().player.pos, spawn_point());
    }

    #[test]
    fn test_start_is_one_way() {
        let mut game = game();
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert!(game.start(11));
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.state().ais.len(), 8);

        game.frame::<DrawList>(None);
        assert!(!game.start(12));
        assert_eq!(game.state().seed, 11);
        assert_eq!(game.state().time_ticks, 1);
    }

    #[test]
    fn test_frame_ticks_and_renders() {
        let mut game = game();
        game.start(3);
        // Keep everything away so only movement matters
        game.state_mut().ais.clear();
        for c in &mut game.state_mut().collectibles {
            c.pos = Vec2::new(-5000.0, -5000.0);
        }
        game.input.key_down("ArrowRight");

        let mut list = DrawList::new();
        game.frame(Some(&mut list));

        assert_eq!(game.state().player.pos, Vec2::new(403.0, 300.0));
        assert!(!list.is_empty());
        // Camera follows, so the player stays centered
        assert_eq!(
            list.circles_with_color(crate::consts::PLAYER_COLOR).collect::<Vec<_>>(),
            vec![Vec2::new(400.0, 300.0)]
        );
    }

    #[test]
    fn test_missing_surface_still_ticks() {
        let mut game = game();
        game.start(3);
        game.frame::<DrawList>(None);
        game.frame::<DrawList>(None);
        assert_eq!(game.state().time_ticks, 2);
    }

    #[test]
    fn test_input_snapshot_taken_each_frame() {
        let mut game = game();
        game.start(3);
        game.state_mut().ais.clear();
        for c in &mut game.state_mut().collectibles {
            c.pos = Vec2::new(-5000.0, -5000.0);
        }

        game.input.joystick_move(1.0, 0.0);
        game.frame::<DrawList>(None);
        game.input.joystick_stop();
        game.frame::<DrawList>(None);

        assert_eq!(game.state().player.pos, Vec2::new(404.5, 300.0));
    }

    #[test]
    fn test_render_twice_is_identical() {
        let mut game = game();
        game.start(8);
        game.frame::<DrawList>(None);

        let mut a = DrawList::new();
        let mut b = DrawList::new();
        game.render(&mut a);
        game.render(&mut b);
        assert_eq!(a, b);
    }
}
