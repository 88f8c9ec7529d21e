//! Star Speller entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, HtmlInputElement, HtmlSelectElement};

    use star_speller::audio::{AudioManager, SoundEffect};
    use star_speller::consts::*;
    use star_speller::renderer::{CanvasRenderer, context_2d};
    use star_speller::sim::{Direction, GameEvent, GameState, TickInput, tick};
    use star_speller::{FrameView, HudView, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        input: TickInput,
        renderer: CanvasRenderer,
        audio: AudioManager,
        /// An animation frame is pending
        running: bool,
    }

    impl Game {
        fn new(seed: u64, renderer: CanvasRenderer) -> Result<Self, JsValue> {
            let settings = Settings::default();
            let state = GameState::new(seed, settings.difficulty)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            let mut audio = AudioManager::new();
            audio.set_volume(settings.gain());
            Ok(Self {
                state,
                settings,
                input: TickInput::default(),
                renderer,
                audio,
                running: false,
            })
        }

        /// Fresh run on the configured difficulty
        fn start(&mut self) {
            self.state.tier = self.settings.difficulty;
            self.state.start();
            self.state.drain_events();
            self.input = TickInput::default();
            self.audio.play_music();
        }

        /// Run one simulation frame. Returns false when the loop should stop.
        fn update(&mut self, time: f64) -> bool {
            self.input.now_ms = time;
            let outcome = tick(&mut self.state, &self.input);

            // Clear one-shot inputs after processing
            self.input.toggle_pause = false;

            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                match event {
                    GameEvent::Paused => self.audio.pause(),
                    GameEvent::Resumed => self.audio.resume(),
                    GameEvent::GameOver { score } => {
                        log::info!("Final score: {}", score);
                        self.audio.stop_music();
                        show_game_over(score);
                    }
                    _ => {}
                }
            }

            outcome.schedule_next
        }

        fn render(&self) {
            self.renderer.render(&FrameView::capture(&self.state));
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = dom() else { return };
            let hud = HudView::capture(&self.state);

            set_text(&document, "score-value", &hud.score.to_string());
            set_text(&document, "lives-value", &hud.lives.to_string());
            set_text(&document, "word-value", &hud.word);

            if let Some(el) = element::<HtmlElement>(&document, "level-display") {
                match &hud.banner {
                    Some(text) => {
                        el.set_text_content(Some(text));
                        let _ = el.style().set_property("display", "block");
                    }
                    None => {
                        let _ = el.style().set_property("display", "none");
                    }
                }
            }

            set_text(
                &document,
                "pause-button",
                if hud.paused { "Resume" } else { "Pause" },
            );
        }
    }

    fn show_game_over(score: i32) {
        let Some(document) = dom() else { return };
        set_text(&document, "final-score", &score.to_string());
        show(&document, "game-over-screen", true);
        set_display(&document, "pause-button", false);
        // The frame loop stops here, so a pending level banner would never expire
        set_display(&document, "level-display", false);
    }

    fn dom() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
        document.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Toggle the `hidden` class on a screen panel
    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if visible {
                classes.remove_1("hidden")
            } else {
                classes.add_1("hidden")
            };
        }
    }

    fn set_display(document: &Document, id: &str, visible: bool) {
        if let Some(el) = element::<HtmlElement>(document, id) {
            let _ = el
                .style()
                .set_property("display", if visible { "block" } else { "none" });
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Star Speller starting...");

        let document = dom().ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = element(&document, "game-canvas")
            .ok_or_else(|| JsValue::from_str("no game canvas"))?;
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        let renderer = CanvasRenderer::new(context_2d(&canvas)?);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, renderer)?));
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        setup_buttons(&document, game.clone());

        show(&document, "start-screen", true);
        set_display(&document, "pause-button", false);
        game.borrow().update_hud();

        log::info!("Star Speller ready");
        Ok(())
    }

    /// Register a click handler on an element, if present
    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        // Start and restart share the same path
        for id in ["start-button", "restart-button"] {
            let game = game.clone();
            on_click(document, id, move || {
                let Some(document) = dom() else { return };
                {
                    let mut g = game.borrow_mut();
                    g.start();
                    show(&document, "start-screen", false);
                    show(&document, "settings-screen", false);
                    show(&document, "game-over-screen", false);
                    set_display(&document, "pause-button", true);
                    g.update_hud();
                }
                ensure_running(game.clone());
            });
        }

        on_click(document, "settings-button", || {
            let Some(document) = dom() else { return };
            show(&document, "start-screen", false);
            show(&document, "settings-screen", true);
        });

        on_click(document, "settings-button-gameover", || {
            let Some(document) = dom() else { return };
            show(&document, "game-over-screen", false);
            show(&document, "settings-screen", true);
        });

        {
            let game = game.clone();
            on_click(document, "save-settings", move || {
                let Some(document) = dom() else { return };
                let volume = element::<HtmlInputElement>(&document, "volume")
                    .and_then(|el| el.value().parse::<u32>().ok())
                    .unwrap_or(50);
                let difficulty = element::<HtmlSelectElement>(&document, "difficulty")
                    .map(|el| el.value())
                    .unwrap_or_default();

                let mut g = game.borrow_mut();
                match Settings::from_form(volume, &difficulty) {
                    Ok(settings) => {
                        settings.apply(&mut g.state);
                        g.audio.set_volume(settings.gain());
                        g.settings = settings;
                    }
                    Err(e) => log::warn!("Ignoring settings: {}", e),
                }

                show(&document, "settings-screen", false);
                show(&document, "start-screen", true);
                g.update_hud();
            });
        }

        on_click(document, "pause-button", move || {
            game.borrow_mut().input.toggle_pause = true;
        });
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if let Some(dir) = arrow(&key) {
                    g.input.keys.press(dir);
                    event.prevent_default();
                    return;
                }
                match key.as_str() {
                    "Escape" | "p" | "P" => g.input.toggle_pause = true,
                    "i" | "I" => {
                        g.input.idle_mode = !g.input.idle_mode;
                        log::info!("Idle mode: {}", g.input.idle_mode);
                    }
                    _ => return,
                }
                event.prevent_default();
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if let Some(dir) = arrow(&event.key()) {
                game.borrow_mut().input.keys.release(dir);
            }
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn arrow(key: &str) -> Option<Direction> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Arm the frame loop unless it is already running
    fn ensure_running(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.running {
                return;
            }
            g.running = true;
        }
        request_animation_frame(game);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let keep_going = g.update(time);
            g.render();
            g.update_hud();
            g.running = keep_going;
            keep_going
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: the autopilot plays for a fixed number of frames
#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use star_speller::sim::{GameEvent, GameState, TickInput, tick};
    use star_speller::{HudView, Settings};

    env_logger::init();
    log::info!("Star Speller (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the playable version");

    let mut args = std::env::args().skip(1);
    let settings = match args.next().filter(|a| a != "-") {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading settings from {}", path))?;
            Settings::from_json(&json).with_context(|| format!("parsing {}", path))?
        }
        None => Settings::default(),
    };
    log::info!("Settings: {}", settings.to_json());
    let frames: u64 = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid frame count {:?}", n))?,
        None => 3600,
    };
    let seed: u64 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid seed {:?}", s))?,
        None => 1,
    };

    let mut state = GameState::new(seed, settings.difficulty).context("starting session")?;
    let mut input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    for frame in 0..frames {
        // 60 Hz display
        input.now_ms = frame as f64 * 1000.0 / 60.0;
        let outcome = tick(&mut state, &input);

        for event in state.drain_events() {
            match event {
                GameEvent::RoundStarted { target } => log::info!("Spelling {}", target),
                GameEvent::LevelUp { level } => log::info!("Level {}", level),
                other => log::debug!("{:?}", other),
            }
        }

        if !outcome.schedule_next {
            break;
        }
    }

    let hud = HudView::capture(&state);
    match hud.final_score() {
        Some(score) => log::info!(
            "Game over after {} frames, final score {}",
            state.frame,
            score
        ),
        None => log::info!("Demo stopped at level {}", hud.level),
    }
    println!("{}", hud.to_json().context("encoding HUD")?);
    Ok(())
}
