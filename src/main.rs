//! Lane Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use lane_runner::platform::{SwipeTracker, key_to_input};
    use lane_runner::renderer::{RenderState, Scene};
    use lane_runner::sim::{GameEvent, GameState, TickInput, increase_speed, spawn_batch, tick};
    use lane_runner::{Camera, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        scene: Scene,
        camera: Camera,
        render_state: Option<RenderState>,
        input: TickInput,
        swipe: SwipeTracker,
    }

    impl Game {
        fn new(state: GameState, width: u32, height: u32) -> Self {
            let mut camera = Camera::new(width, height);
            camera.follow(&state.camera);
            Self {
                scene: Scene::new(state.track.segment_length()),
                state,
                camera,
                render_state: None,
                input: TickInput::default(),
                swipe: SwipeTracker::default(),
            }
        }

        /// Run one simulation tick with the input gathered since the last frame
        fn update(&mut self) {
            tick(&mut self.state, &self.input);
            self.input.clear();
            self.camera.follow(&self.state.camera);
        }

        /// Forward queued notifications to the scene and the HUD
        fn flush_events(&mut self) {
            for event in self.state.drain_events() {
                self.scene.apply(&event);
                match event {
                    GameEvent::CoinsChanged { coins } => {
                        set_text("coin-counter", &format!("Coins: {coins}"));
                    }
                    GameEvent::GameOver { score, coins } => show_game_over(score, coins),
                    _ => {}
                }
            }
            self.scene.sync(&self.state);
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = self
                .scene
                .build_vertices(&self.camera, self.state.player.pos);
            if let Some(ref mut render_state) = self.render_state {
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

        fn resize(&mut self, width: u32, height: u32) {
            self.camera.set_viewport(width, height);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn show_game_over(score: u64, coins: u32) {
        set_text(
            "game-over-text",
            &format!("Game Over! Score: {score}, Coins: {coins}"),
        );
        if let Some(el) = document().and_then(|d| d.get_element_by_id("game-over-modal")) {
            let _ = el.set_attribute("class", "");
        }
    }

    /// Optional inline override: `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Using tuning override");
                tuning
            }
            Err(e) => {
                log::error!("Ignoring tuning override: {e}");
                Tuning::default()
            }
        }
    }

    /// Canvas size in device pixels
    fn canvas_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width, height)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = canvas_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = load_tuning(&document);
        let seed = js_sys::Date::now() as u64;
        let state = match GameState::with_tuning(seed, tuning) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Cannot start run: {e}");
                return;
            }
        };
        let spawn_interval_ms = state.tuning.spawn_interval_ms as i32;
        let speed_up_interval_ms = state.tuning.speed_up_interval_ms as i32;
        let game = Rc::new(RefCell::new(Game::new(state, width, height)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .expect("Failed to create device");
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(canvas, game.clone());

        // Wall-clock timers run beside the frame loop
        spawn_and_rearm(game.clone(), spawn_interval_ms);
        start_speed_up(game.clone(), speed_up_interval_ms);

        request_animation_frame(game);

        log::info!("Lane Runner running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(input) = key_to_input(&event.code()) {
                    event.prevent_default();
                    game.borrow_mut().input.push(input);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().swipe.touch_start(touch.client_x() as f32);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end (swipe or tap)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.changed_touches().get(0) {
                    let mut g = game.borrow_mut();
                    if let Some(input) = g.swipe.touch_end(touch.client_x() as f32) {
                        g.input.push(input);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = canvas_size(&window, &canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            game.borrow_mut().resize(width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Spawn a batch now and re-arm a one-shot timer until the run ends
    fn spawn_and_rearm(game: Rc<RefCell<Game>>, interval_ms: i32) {
        if !spawn_batch(&mut game.borrow_mut().state) {
            log::debug!("Spawn timer stopped");
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move || spawn_and_rearm(game, interval_ms));
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms,
        );
        closure.forget();
    }

    /// Repeating speed-up timer, cleared on the first firing after game over
    fn start_speed_up(game: Rc<RefCell<Game>>, interval_ms: i32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let closure = {
            let handle = handle.clone();
            Closure::<dyn FnMut()>::new(move || {
                if increase_speed(&mut game.borrow_mut().state) {
                    return;
                }
                if let (Some(id), Some(window)) = (handle.take(), web_sys::window()) {
                    window.clear_interval_with_handle(id);
                    log::debug!("Speed-up timer stopped");
                }
            })
        };
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms,
        ) {
            Ok(id) => handle.set(Some(id)),
            Err(e) => log::warn!("Failed to start speed-up timer: {:?}", e),
        }
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let over = {
            let mut g = game.borrow_mut();
            g.update();
            g.flush_events();
            g.render();
            g.state.is_game_over()
        };

        // Final frame already drawn; stop re-arming
        if !over {
            request_animation_frame(game);
        }
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
    log::info!("Lane Runner (native) starting...");
    log::info!("Native mode runs a headless simulation - run with `trunk serve` for the web version");

    headless::run(42);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run on a simulated 60 Hz clock with a simple lane-dodging autopilot
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use lane_runner::sim::{GameEvent, GameState, InputEvent, SpawnScheduler, TickInput, tick};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Two minutes of play
    const MAX_TICKS: u64 = 60 * 120;
    /// How far ahead the autopilot looks for obstacles
    const LOOKAHEAD: f32 = 4.0;

    pub fn run(seed: u64) {
        let mut state = GameState::new(seed);
        let mut scheduler = SpawnScheduler::new(&state, 0.0);
        let mut input = TickInput::default();

        while !state.is_game_over() && state.time_ticks < MAX_TICKS {
            let now_ms = state.time_ticks as f64 * FRAME_MS;
            scheduler.poll(now_ms, &mut state);

            if let Some(dodge) = autopilot(&state) {
                input.push(dodge);
            }
            tick(&mut state, &input);
            input.clear();

            for event in state.drain_events() {
                match event {
                    GameEvent::CoinsChanged { coins } => log::debug!("Coins: {}", coins),
                    GameEvent::GameOver { score, coins } => {
                        log::info!("Game over: score={} coins={}", score, coins)
                    }
                    _ => {}
                }
            }
        }

        log::info!(
            "Run finished after {} ticks: score={} coins={} speed={:.3} over={} timers_stopped={}",
            state.time_ticks,
            state.score,
            state.coins,
            state.speed,
            state.is_game_over(),
            scheduler.is_stopped()
        );
    }

    /// Step out of the current lane when an obstacle is about to arrive
    fn autopilot(state: &GameState) -> Option<InputEvent> {
        let player = &state.player;
        let lane_x = player.pos.x;
        let threatened = state.obstacles.iter().any(|o| {
            (o.pos.x - lane_x).abs() < 0.5
                && o.pos.z < player.pos.z
                && player.pos.z - o.pos.z < LOOKAHEAD
        });
        if !threatened {
            return None;
        }
        if player.lane.get() > 0 {
            Some(InputEvent::LaneLeft)
        } else {
            Some(InputEvent::LaneRight)
        }
    }
}
