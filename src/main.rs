//! Side Scroller entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlInputElement, KeyboardEvent};

    use side_scroller::platform::{Control, InputState};
    use side_scroller::renderer::{RenderState, build_scene};
    use side_scroller::sim::Level;
    use side_scroller::{GameStatus, Session, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        input: InputState,
        render_state: Option<RenderState>,
        viewport: Vec2,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Track status to toggle overlays on change only
        last_status: Option<GameStatus>,
    }

    impl Game {
        fn new(session: Session, settings: Settings) -> Self {
            let camera = session.tuning().camera;
            Self {
                session,
                settings,
                input: InputState::default(),
                render_state: None,
                viewport: Vec2::new(camera.viewport_width, camera.viewport_height),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_status: None,
            }
        }

        /// (Re)start the run and drop any keys held from the previous one
        fn start(&mut self, now: f64) {
            self.input.clear();
            self.session.start(now);
        }

        /// Run one simulation step
        fn update(&mut self, time: f64) {
            let now = time / 1000.0;
            let input = self.input.snapshot();
            self.session
                .frame(&input, self.settings.jump_modifier(), now);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices =
                    build_scene(self.session.sim(), self.session.level(), self.viewport);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, now: f64) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-time .hud-value").ok().flatten() {
                el.set_text_content(Some(&format!("{:.2}s", self.session.elapsed(now))));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                let _ = el
                    .class_list()
                    .toggle_with_force("hidden", !self.settings.show_fps);
            }
            if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.fps.to_string()));
            }

            let status = self.session.status();
            if self.last_status == Some(status) {
                return;
            }
            self.last_status = Some(status);

            for (id, visible) in [
                ("start-screen", status == GameStatus::Start),
                ("won-screen", status == GameStatus::Won),
                ("lost-screen", status == GameStatus::Lost),
            ] {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.class_list().toggle_with_force("hidden", !visible);
                }
            }

            if let Some(completion) = self.session.completion() {
                if let Some(el) = document.get_element_by_id("final-time") {
                    el.set_text_content(Some(&format!("{:.2}s", completion.completion_time)));
                }
                if let Some(el) = document.get_element_by_id("final-points") {
                    el.set_text_content(Some(&completion.points.to_string()));
                }
            }
        }
    }

    /// Seconds on the same clock as requestAnimationFrame timestamps
    fn now_seconds() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now() / 1000.0)
            .unwrap_or(0.0)
    }

    /// Owns the requestAnimationFrame callback. Until `stop` is called the
    /// callback keeps itself alive and re-registers every frame.
    struct FrameLoop {
        callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
        handle: Rc<Cell<Option<i32>>>,
    }

    impl FrameLoop {
        fn start(game: Rc<RefCell<Game>>) -> Rc<Self> {
            let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
                Rc::new(RefCell::new(None));
            let handle = Rc::new(Cell::new(None));

            let next_callback = callback.clone();
            let next_handle = handle.clone();
            *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                game_loop(&game, time);
                if let Some(cb) = next_callback.borrow().as_ref() {
                    next_handle.set(request_animation_frame(cb));
                }
            }));

            if let Some(cb) = callback.borrow().as_ref() {
                handle.set(request_animation_frame(cb));
            }

            Rc::new(Self { callback, handle })
        }

        /// Cancel the pending frame and release the callback
        fn stop(&self) {
            if let (Some(id), Some(window)) = (self.handle.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(id);
            }
            if self.callback.borrow_mut().take().is_some() {
                log::info!("Frame loop stopped");
            }
        }
    }

    fn request_animation_frame(cb: &Closure<dyn FnMut(f64)>) -> Option<i32> {
        web_sys::window()?
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .ok()
    }

    fn game_loop(game: &Rc<RefCell<Game>>, time: f64) {
        let mut g = game.borrow_mut();
        g.update(time);
        g.render();
        g.update_hud(time / 1000.0);
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Side Scroller starting...");

        let level = match Level::builtin() {
            Ok(level) => level,
            Err(e) => {
                log::error!("Bundled level is invalid: {e}");
                return;
            }
        };
        log::info!(
            "Loaded level {}x{} with {} entities",
            level.width,
            level.height,
            level.entities.len()
        );

        let Some(session) = Session::new(level, Tuning::default()) else {
            log::error!("Level has no start marker");
            return;
        };

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let game = Rc::new(RefCell::new(Game::new(session, Settings::load())));

        // Initialize WebGPU, falling back to WebGL
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        let viewport = game.borrow().viewport;
                        match RenderState::new(surface, &adapter, width, height, viewport).await {
                            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create device: {e}"),
                        }
                    }
                    Err(e) => log::error!("No GPU adapter: {e}"),
                }
            }
            Err(e) => log::error!("Failed to create surface: {e}"),
        }

        setup_input_handlers(game.clone());
        setup_jump_slider(game.clone());
        setup_buttons(game.clone());

        // Show HUD
        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.class_list().remove_1("hidden");
        }

        let frame_loop = FrameLoop::start(game);
        setup_teardown(frame_loop);

        log::info!("Side Scroller running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down: hold controls, Enter/Space (re)start outside of play
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut g = game.borrow_mut();

                if g.session.status() != GameStatus::Playing {
                    if key == "Enter" || key == " " {
                        event.prevent_default();
                        g.start(now_seconds());
                    }
                    return;
                }

                if let Some(control) = Control::from_key(&key) {
                    event.prevent_default();
                    if !g.input.is_pressed(control) {
                        log::debug!("{} pressed", control.as_str());
                    }
                    g.input.set(control, true);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(control) = Control::from_key(&event.key()) {
                    game.borrow_mut().input.set(control, false);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-up events never arrive, so release everything
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_jump_slider(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(slider) = document
            .get_element_by_id("jump-slider")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };

        let show_value = |value: f32| {
            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("jump-value"))
            {
                el.set_text_content(Some(&format!("{:.2}x", value)));
            }
        };

        let initial = game.borrow().settings.jump_modifier();
        slider.set_value(&initial.to_string());
        show_value(initial);

        let slider_clone = slider.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Ok(value) = slider_clone.value().parse::<f32>() else {
                return;
            };
            let mut g = game.borrow_mut();
            g.settings.set_jump_modifier(value);
            g.settings.save();
            show_value(g.settings.jump_modifier());
        });
        let _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for id in ["start-btn", "retry-btn", "again-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().start(now_seconds());
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Stop the frame loop when the page is torn down
    fn setup_teardown(frame_loop: Rc<FrameLoop>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            frame_loop.stop();
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Side Scroller (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    run_headless();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play the bundled level with a scripted run-and-jump input and log the result
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() {
    use side_scroller::consts::JUMP_MODIFIER_MAX;
    use side_scroller::sim::{Level, TickInput};
    use side_scroller::{GameStatus, Session, Tuning};

    const FPS: f64 = 60.0;
    const MAX_FRAMES: u32 = 60 * 120;

    let level = match Level::builtin() {
        Ok(level) => level,
        Err(e) => {
            log::error!("Bundled level is invalid: {e}");
            return;
        }
    };
    let Some(mut session) = Session::new(level, Tuning::default()) else {
        log::error!("Level has no start marker");
        return;
    };

    session.start(0.0);
    let mut frame = 0;
    while session.status() == GameStatus::Playing && frame < MAX_FRAMES {
        frame += 1;
        let input = TickInput {
            move_right: true,
            jump: frame % 40 < 20,
            ..Default::default()
        };
        session.frame(&input, JUMP_MODIFIER_MAX, frame as f64 / FPS);
    }

    let player = &session.sim().player;
    println!(
        "Headless run: {:?} after {} frames at ({:.0}, {:.0})",
        session.status(),
        frame,
        player.pos.x,
        player.pos.y
    );
    if let Some(completion) = session.completion() {
        println!(
            "Completed in {:.2}s for {} points",
            completion.completion_time, completion.points
        );
    }
}
