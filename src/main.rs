//! Rocks entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use rocks::Settings;
    use rocks::Tuning;
    use rocks::audio::web::{Synth, browser_audio};
    use rocks::consts::*;
    use rocks::input::{KeyPhase, map_key, map_key_code};
    use rocks::persistence::LocalStore;
    use rocks::renderer::{CanvasPainter, Scene};
    use rocks::sim::{Clock, Intent};

    /// Game instance holding all state
    struct Game {
        clock: Clock,
        painter: CanvasPainter,
        settings: Settings,
        synth: Rc<Synth>,
        last_time: f64,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            self.clock.advance(dt);
        }

        /// Render the current frame
        fn render(&self) {
            let scene = Scene::capture(self.clock.state(), &self.settings);
            self.painter.paint(&scene);
        }

        fn key(&mut self, phase: KeyPhase, event: &KeyboardEvent) {
            let key = event.key();
            let intent = if key.is_empty() {
                map_key_code(phase, event.key_code())
            } else {
                map_key(phase, &key)
            };
            if let Some(intent) = intent {
                event.prevent_default();
                self.clock.push_intent(intent);
            }
        }

        /// Let go of every held control
        fn release_all(&mut self) {
            for intent in [Intent::FireRelease, Intent::RotateStop, Intent::ThrustOff] {
                self.clock.push_intent(intent);
            }
        }

        /// Match the canvas and arena to the element's layout size
        fn fit_canvas(&mut self) {
            let (width, height) = self.painter.client_size();
            if width == 0 || height == 0 || (width, height) == self.painter.size() {
                return;
            }
            self.painter.set_size(width, height);
            self.clock.resize(width as f32, height as f32);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Rocks starting...");

        let painter = match CanvasPainter::attach("canvas") {
            Ok(painter) => painter,
            Err(e) => {
                log::error!("Cannot start: {e}");
                return;
            }
        };
        let (mut width, mut height) = painter.client_size();
        if width == 0 || height == 0 {
            (width, height) = (DEFAULT_WIDTH as u32, DEFAULT_HEIGHT as u32);
        }
        painter.set_size(width, height);

        let settings = Settings::load();
        let (audio, synth) = browser_audio(&settings);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let clock = Clock::new(
            seed,
            width as f32,
            height as f32,
            Tuning::default(),
            audio,
            Box::new(LocalStore::new()),
        );
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            clock,
            painter,
            settings,
            synth,
            last_time: 0.0,
        }));

        setup_input_handlers(game.clone());
        setup_focus_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Rocks running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        for (event_name, phase) in [("keydown", KeyPhase::Down), ("keyup", KeyPhase::Up)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                // Browsers only allow audio after a user gesture
                g.synth.resume();
                g.key(phase, &event);
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        if let Some(document) = window.document() {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().release_all();
                    log::info!("Controls released (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside), keyup never arrives
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().release_all();
                log::info!("Controls released (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().fit_canvas();
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rocks::audio::Audio;
    use rocks::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, SIM_HZ};
    use rocks::persistence::FileStore;
    use rocks::renderer::Scene;
    use rocks::sim::{Clock, Intent};
    use rocks::{Settings, Tuning};

    env_logger::init();

    log::info!("Rocks (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play in the browser");

    let tuning = match std::env::var("ROCKS_TUNING") {
        Ok(path) => match Tuning::load(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {path}");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {path}: {e}");
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };
    let seed = std::env::var("ROCKS_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5EED);
    let settings = Settings::load();

    let mut clock = Clock::new(
        seed,
        DEFAULT_WIDTH,
        DEFAULT_HEIGHT,
        tuning,
        Audio::silent(),
        Box::new(FileStore::new("rocks_highscore.json")),
    );

    // Scripted pilot: spin slowly and fire twice a second
    let seconds = 60;
    let ticks = seconds * SIM_HZ as u32;
    clock.push_intent(Intent::RotateLeft);
    for t in 0..ticks {
        match t % 30 {
            0 => clock.push_intent(Intent::Fire),
            1 => clock.push_intent(Intent::FireRelease),
            _ => {}
        }
        if t % 240 == 120 {
            clock.push_intent(Intent::ThrustOn);
        } else if t % 240 == 150 {
            clock.push_intent(Intent::ThrustOff);
        }
        clock.step();
    }

    let state = clock.state();
    let scene = Scene::capture(state, &settings);
    log::info!(
        "Demo finished after {} ticks: level {}, score {}, lives {}, high score {}, {} shapes on screen",
        state.time_ticks,
        state.level + 1,
        state.score,
        state.lives,
        state.high_score,
        scene.shapes.len()
    );
    println!(
        "level {} score {} high {}",
        state.level + 1,
        state.score,
        state.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
