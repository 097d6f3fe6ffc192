//! Pixel Ball Arena entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent,
        MouseEvent, PageTransitionEvent, TouchEvent,
    };

    use pixel_ball_arena::consts::*;
    use pixel_ball_arena::platform::{
        LoopStatus, VirtualJoystick, hide_stops_loop, is_movement_key, show_resumes_loop,
    };
    use pixel_ball_arena::renderer::CanvasSurface;
    use pixel_ball_arena::sim::GameEvent;
    use pixel_ball_arena::{Game, Settings, Tuning};

    /// Screens narrower than this get the on-screen joystick
    const JOYSTICK_BREAKPOINT: f64 = 768.0;
    /// Opponents listed in the HUD
    const HUD_OPPONENTS: usize = 5;

    /// Browser-side wrapper around the frame driver
    struct App {
        game: Game,
        surface: Option<CanvasSurface>,
        joystick: VirtualJoystick,
        /// Pending requestAnimationFrame handle
        frame_handle: Option<i32>,
        torn_down: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// HUD needs a refresh (level or roster changed)
        hud_dirty: bool,
    }

    impl App {
        fn new(game: Game, surface: Option<CanvasSurface>) -> Self {
            Self {
                game,
                surface,
                joystick: VirtualJoystick::default(),
                frame_handle: None,
                torn_down: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                hud_dirty: true,
            }
        }

        /// Advance and draw one frame
        fn update(&mut self, time: f64) {
            let events = self.game.frame(self.surface.as_mut());
            if events.iter().any(|e| {
                !matches!(e, GameEvent::CollectiblesReplenished { .. })
            }) {
                self.hud_dirty = true;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.game.settings.show_fps {
                    el.set_text_content(Some(&format!("{} FPS", self.fps)));
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            if !self.hud_dirty {
                return;
            }
            self.hud_dirty = false;

            if let Some(el) = document.get_element_by_id("hud") {
                let class = if self.game.settings.show_hud { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }

            let state = self.game.state();
            if let Some(el) = document.get_element_by_id("hud-level") {
                el.set_text_content(Some(&state.player.level.to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-opponents") {
                let rows: String = state
                    .ais
                    .iter()
                    .take(HUD_OPPONENTS)
                    .map(|ai| {
                        format!(
                            "<div class=\"opponent\"><span class=\"swatch\" style=\"background:{}\"></span>Lvl {}</div>",
                            ai.color, ai.level
                        )
                    })
                    .collect();
                el.set_inner_html(&rows);
            }
        }

        /// Move the knob element to match the joystick state
        fn update_knob(&self, document: &Document) {
            let Some(knob) = document
                .get_element_by_id("joystick-knob")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };
            let offset = self.joystick.knob_offset();
            let _ = knob.style().set_property(
                "transform",
                &format!(
                    "translate(calc(-50% + {}px), calc(-50% + {}px))",
                    offset.x, offset.y
                ),
            );
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Pixel Ball Arena starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let surface = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(|canvas| {
                canvas.set_width(VIEWPORT_WIDTH as u32);
                canvas.set_height(VIEWPORT_HEIGHT as u32);
                canvas.get_context("2d").ok().flatten()
            })
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .map(CanvasSurface::new);
        if surface.is_none() {
            log::warn!("No 2D canvas available, frames will not be drawn");
        }

        let game = Game::new(Tuning::load(), Settings::load());
        let app = Rc::new(RefCell::new(App::new(game, surface)));

        setup_keyboard(app.clone())?;
        setup_joystick(&document, app.clone())?;
        setup_start_button(&document, app.clone())?;
        setup_teardown(app)?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        log::info!("Pixel Ball Arena ready");
        Ok(())
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                let key = event.key();
                if !a.game.is_running() {
                    return;
                }
                if is_movement_key(&key) {
                    event.prevent_default();
                }
                match key.as_str() {
                    "g" | "G" => toggle_setting(&mut a.game.settings, |s| &mut s.show_grid),
                    "l" | "L" => toggle_setting(&mut a.game.settings, |s| &mut s.show_levels),
                    "f" | "F" => toggle_setting(&mut a.game.settings, |s| &mut s.show_fps),
                    "h" | "H" => {
                        toggle_setting(&mut a.game.settings, |s| &mut s.show_hud);
                        a.hud_dirty = true;
                    }
                    _ => {}
                }
                a.game.input.key_down(&key);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.input.key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur: key-up events are lost, drop held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                a.game.input.clear();
                a.joystick.end();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn toggle_setting(settings: &mut Settings, field: impl Fn(&mut Settings) -> &mut bool) {
        let flag = field(settings);
        *flag = !*flag;
        settings.save();
    }

    fn setup_joystick(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let Some(base) = document.get_element_by_id("joystick") else {
            log::warn!("No #joystick element, touch steering disabled");
            return Ok(());
        };

        let window = web_sys::window().ok_or("no window")?;
        let narrow = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .is_some_and(|w| w < JOYSTICK_BREAKPOINT);
        if narrow || app.borrow().game.settings.always_show_joystick {
            let _ = base.set_attribute("class", "");
        }

        // Press on the base
        let begin = {
            let app = app.clone();
            let base = base.clone();
            move |client: Vec2| {
                let rect = base.get_bounding_client_rect();
                let center = Vec2::new(
                    (rect.left() + rect.width() / 2.0) as f32,
                    (rect.top() + rect.height() / 2.0) as f32,
                );
                let mut a = app.borrow_mut();
                a.joystick.set_center(center);
                let v = a.joystick.begin(client);
                a.game.input.joystick_move(v.x, v.y);
            }
        };
        {
            let begin = begin.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                begin(Vec2::new(event.client_x() as f32, event.client_y() as f32));
            });
            base.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    begin(Vec2::new(touch.client_x() as f32, touch.client_y() as f32));
                }
            });
            base.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Drag anywhere on the page once started
        let drag = {
            let app = app.clone();
            move |client: Vec2| {
                let mut a = app.borrow_mut();
                if let Some(v) = a.joystick.drag(client) {
                    a.game.input.joystick_move(v.x, v.y);
                }
            }
        };
        {
            let drag = drag.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                drag(Vec2::new(event.client_x() as f32, event.client_y() as f32));
            });
            document.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if !app.borrow().joystick.is_dragging() {
                    return;
                }
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    drag(Vec2::new(touch.client_x() as f32, touch.client_y() as f32));
                }
            });
            document.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Release
        let end = move || {
            let mut a = app.borrow_mut();
            if a.joystick.end() {
                a.game.input.joystick_stop();
            }
        };
        {
            let end = end.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| end());
            document.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| end());
            document.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_start_button(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id("start-btn") else {
            // No menu on the page: start right away
            start(app);
            return Ok(());
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            start(app.clone());
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// NotStarted -> Running, then schedule the first frame
    fn start(app: Rc<RefCell<App>>) {
        let seed = js_sys::Date::now() as u64;
        if !app.borrow_mut().game.start(seed) {
            return;
        }

        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Some(el) = document.get_element_by_id("menu") {
                let _ = el.set_attribute("class", "hidden");
            }
            if let Some(el) = document.get_element_by_id("arena") {
                let _ = el.set_attribute("class", "");
            }
        }

        request_animation_frame(app);
    }

    /// Cancel the pending frame when the page goes away. A page kept in the
    /// back/forward cache only pauses and resumes on `pageshow`.
    fn setup_teardown(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                let mut a = app.borrow_mut();
                if let Some(handle) = a.frame_handle.take() {
                    if let Some(window) = web_sys::window() {
                        let _ = window.cancel_animation_frame(handle);
                    }
                }
                if hide_stops_loop(event.persisted()) {
                    a.torn_down = true;
                    log::info!("Game loop stopped");
                } else {
                    log::info!("Game loop paused");
                }
            });
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                let resume = {
                    let a = app.borrow();
                    let status = LoopStatus {
                        running: a.game.is_running(),
                        frame_pending: a.frame_handle.is_some(),
                        torn_down: a.torn_down,
                    };
                    show_resumes_loop(event.persisted(), status)
                };
                if resume {
                    log::info!("Game loop resumed");
                    request_animation_frame(app.clone());
                }
            });
            window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback_app = app.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(callback_app, time);
        });
        let handle = window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
        app.borrow_mut().frame_handle = handle;
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.frame_handle = None;
            if a.torn_down {
                return;
            }

            a.update(time);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                a.update_hud(&document);
                a.update_knob(&document);
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pixel Ball Arena (native) starting...");
    log::info!("Native mode runs a headless session - run with `trunk serve` for the web version");

    run_headless_session(600);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive a scripted session at a fixed step and report what happened
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_session(frames: u32) {
    use pixel_ball_arena::renderer::DrawList;
    use pixel_ball_arena::sim::GameEvent;
    use pixel_ball_arena::{Game, Settings, Tuning};

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut game = Game::new(Tuning::load(), Settings::load());
    game.start(seed);

    // Walk a square: right, down, left, up
    let legs = ["d", "s", "a", "w"];
    let mut surface = DrawList::new();
    let (mut pickups, mut absorbed, mut defeats) = (0u32, 0u32, 0u32);

    for frame in 0..frames {
        let leg = legs[(frame / 120) as usize % legs.len()];
        game.input.clear();
        game.input.key_down(leg);

        surface.clear();
        for event in game.frame(Some(&mut surface)) {
            log::debug!(
                "tick {}: {}",
                game.state().time_ticks,
                serde_json::to_string(&event).unwrap_or_default()
            );
            match event {
                GameEvent::CollectibleConsumed { by, .. } if by == game.state().player.id => {
                    pickups += 1
                }
                GameEvent::AiAbsorbed { .. } => absorbed += 1,
                GameEvent::PlayerDefeated { .. } => defeats += 1,
                _ => {}
            }
        }
    }

    let state = game.state();
    log::info!(
        "{} frames: level {}, {} pickups, {} opponents absorbed, {} defeats, {} opponents left, {} collectibles, {} draw calls last frame",
        state.time_ticks,
        state.player.level,
        pickups,
        absorbed,
        defeats,
        state.ais.len(),
        state.collectibles.len(),
        surface.len()
    );
}
