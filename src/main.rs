//! Orb Runner entry point
//!
//! Browser builds host the game on a canvas; native builds run a headless
//! autopilot session against a synthetic clock.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use orb_runner::platform::{LogHooks, PendingFrame, PerformanceClock};
    use orb_runner::renderer::RenderState;
    use orb_runner::sim::SessionPhase;
    use orb_runner::{Session, Settings};

    type WebSession = Session<PerformanceClock, PendingFrame, LogHooks>;

    /// Game instance holding all state
    struct Game {
        session: WebSession,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        show_difficulty: bool,
        /// Phase the DOM screens currently reflect
        shown_phase: SessionPhase,
    }

    impl Game {
        fn new(settings: &Settings, seed: u64, canvas: HtmlCanvasElement) -> Self {
            Self {
                session: Session::new(
                    settings,
                    seed,
                    PerformanceClock::new(),
                    PendingFrame::default(),
                    LogHooks,
                ),
                render_state: None,
                canvas,
                show_difficulty: settings.show_difficulty,
                shown_phase: SessionPhase::Idle,
            }
        }

        /// Match canvas, surface and simulation to the window size
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0) as u32;
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0) as u32;
            if width == 0 || height == 0 {
                return;
            }

            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.session.resize(width as f32, height as f32);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(render_state) = self.render_state.as_mut() {
                match render_state.render_snapshot(&self.session.snapshot()) {
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

        /// Update HUD text and show/hide screens on phase changes
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let snapshot = self.session.snapshot();

            if snapshot.phase == SessionPhase::Playing {
                if let Some(el) = document.get_element_by_id("score-display") {
                    el.set_text_content(Some(&snapshot.score_text()));
                }
                if let Some(el) = document.get_element_by_id("difficulty-display") {
                    let text = if self.show_difficulty {
                        snapshot.difficulty_text()
                    } else {
                        String::new()
                    };
                    el.set_text_content(Some(&text));
                }
            }

            if snapshot.phase == self.shown_phase {
                return;
            }
            self.shown_phase = snapshot.phase;

            let set_visible = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let classes = el.class_list();
                    if visible {
                        let _ = classes.remove_1("hidden");
                        let _ = classes.add_1("active");
                    } else {
                        let _ = classes.add_1("hidden");
                        let _ = classes.remove_1("active");
                    }
                }
            };

            match snapshot.phase {
                SessionPhase::Idle => {
                    set_visible("start-screen", true);
                    set_visible("game-over-screen", false);
                    set_visible("hud", false);
                }
                SessionPhase::Playing => {
                    set_visible("start-screen", false);
                    set_visible("game-over-screen", false);
                    set_visible("hud", true);
                }
                SessionPhase::GameOver => {
                    if let Some(el) = document.get_element_by_id("final-score") {
                        el.set_text_content(Some(&snapshot.final_score_text()));
                    }
                    set_visible("game-over-screen", true);
                    set_visible("hud", false);
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Orb Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(&settings, seed, canvas.clone())));
        game.borrow_mut().resize();

        log::info!("Game initialized with seed: {}", seed);

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

        let (width, height) = (canvas.width(), canvas.height());
        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {e}"),
        }

        setup_resize_handler(game.clone());
        setup_input_handlers(game.clone());
        setup_session_buttons(game.clone());

        // Initial idle frame
        {
            let mut g = game.borrow_mut();
            g.render();
            g.update_hud();
        }

        log::info!("Orb Runner ready");
    }

    /// Start (or restart) a session and kick off the frame loop
    fn start_session(game: &Rc<RefCell<Game>>) {
        let schedule = {
            let mut g = game.borrow_mut();
            g.session.start();
            g.update_hud();
            g.session.scheduler_mut().take()
        };
        if schedule {
            request_animation_frame(game.clone());
        }
    }

    fn thrust(game: &Rc<RefCell<Game>>) {
        game.borrow_mut().session.thrust();
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.resize();
            if !g.session.is_playing() {
                g.render();
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                thrust(&game);
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default(); // Prevent scrolling
                thrust(&game);
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" | "ArrowUp" => {
                        event.prevent_default(); // Prevent scrolling and button activation
                        thrust(&game);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_session_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .expect("no document");

        for id in ["start-btn", "restart-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{id}");
                continue;
            };
            let game = game.clone();
            let btn_clone = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                // Drop focus so Space doesn't re-click the button
                if let Some(el) = btn_clone.dyn_ref::<HtmlElement>() {
                    let _ = el.blur();
                }
                start_session(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        let again = {
            let mut g = game.borrow_mut();
            g.session.frame();
            g.render();
            g.update_hud();
            g.session.scheduler_mut().take()
        };

        if again {
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
mod headless {
    use orb_runner::platform::{LogHooks, ManualClock, PendingFrame};
    use orb_runner::sim::SimulationState;
    use orb_runner::{Session, Settings};

    /// Synthetic display refresh
    const FRAME_SECS: f64 = 1.0 / 60.0;
    /// Stop after five simulated minutes
    const MAX_FRAMES: u64 = 60 * 300;

    /// Aim for the middle of the next gap; thrust when sinking below it
    pub fn wants_thrust(state: &SimulationState) -> bool {
        let player = &state.player;
        let width = state.tuning.obstacle_width;

        let target = state
            .obstacles
            .iter()
            .filter(|o| o.x + width >= player.pos.x - player.radius)
            .min_by(|a, b| a.x.total_cmp(&b.x))
            .map(|o| (o.top_height + o.gap_bottom_y) / 2.0)
            .unwrap_or(state.height / 2.0);

        let next_y = player.pos.y + player.velocity + state.tuning.gravity;
        next_y > target && player.velocity >= 0.0
    }

    pub fn run(seed: u64) {
        let settings = Settings::load();
        let mut session = Session::new(
            &settings,
            seed,
            ManualClock::new(0.0),
            PendingFrame::default(),
            LogHooks,
        );

        session.start();
        while session.scheduler_mut().take() {
            session.clock_mut().advance(FRAME_SECS);
            if wants_thrust(session.state()) {
                session.thrust();
            }
            session.frame();
            if session.state().frames >= MAX_FRAMES {
                log::info!("Frame limit reached");
                break;
            }
        }

        let state = session.state();
        let reason = state.end_reason.map(|r| r.as_str()).unwrap_or("time limit");
        println!(
            "Survived {:.1}s ({} frames, difficulty x{:.2}, ended by {})",
            state.score, state.frames, state.difficulty.factor, reason
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Orb Runner (native) starting headless autopilot...");
    log::info!("Run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
