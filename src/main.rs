//! Neon Snake entry point
//!
//! Handles platform-specific initialization and drives the tick loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use neon_snake::platform::{IntervalScheduler, heading_for_key};
    use neon_snake::renderer::frame_shapes;
    use neon_snake::sim::{GameEvent, SimulationLoop};
    use neon_snake::{Settings, Theme};

    // The page owns the 2D context; we hand it pixel geometry as JSON
    #[wasm_bindgen(inline_js = "
        export function present_frame(json) {
            if (typeof window.neonSnakeRender === 'function') {
                window.neonSnakeRender(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn present_frame(json: &str);
    }

    /// Game instance holding all state
    struct Game {
        sim: SimulationLoop<IntervalScheduler>,
        /// Stored preferences; the sim gets a copy fitted to the canvas
        prefs: Settings,
    }

    impl Game {
        /// Run one simulation step and push the result to the page
        fn tick(&mut self) {
            for event in self.sim.tick() {
                match event {
                    GameEvent::Ate { score } => update_score(score),
                    GameEvent::SpedUp { interval_ms } => {
                        log::info!("Speed up: {}ms per tick", interval_ms)
                    }
                    GameEvent::GameOver {
                        final_score,
                        reason,
                    } => {
                        log::info!("Game over ({:?}), score {}", reason, final_score);
                        set_hidden("restart-btn", false);
                    }
                    GameEvent::Moved { .. } => {}
                }
            }
            self.present();
        }

        fn restart(&mut self) {
            self.sim.start();
            update_score(self.sim.score());
            set_hidden("restart-btn", true);
            self.present();
        }

        fn present(&self) {
            let scale = self.sim.settings().cell_scale as f32;
            let shapes = frame_shapes(&self.sim.frame(), scale);
            match serde_json::to_string(&shapes) {
                Ok(json) => present_frame(&json),
                Err(e) => log::warn!("Frame encode failed: {}", e),
            }
        }

        fn toggle_theme(&mut self) {
            self.prefs.theme = self.prefs.theme.toggled();
            apply_theme(self.prefs.theme);
            self.prefs.save();
        }
    }

    fn document() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("no document")
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = document().get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn update_score(score: u32) {
        if let Some(el) = document().get_element_by_id("score-board") {
            el.set_text_content(Some(&format!("Score: {}", score)));
        }
    }

    fn apply_theme(theme: Theme) {
        if let Some(body) = document().body() {
            let classes = body.class_list();
            let _ = classes.remove_2(Theme::Dark.as_str(), Theme::Light.as_str());
            let _ = classes.add_1(theme.as_str());
        }
    }

    fn on_tick(game: &Weak<RefCell<Game>>) {
        let Some(game) = game.upgrade() else {
            return;
        };
        // A tick never re-enters; skip rather than panic if a handler holds the game
        if let Ok(mut g) = game.try_borrow_mut() {
            g.tick();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Snake starting...");

        let prefs = Settings::load();
        let mut settings = match document()
            .get_element_by_id("game-canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        {
            Some(canvas) => prefs.fit_canvas(canvas.width(), canvas.height()),
            None => prefs.clone(),
        };
        if let Err(e) = settings.validate() {
            log::warn!("Canvas not playable ({}), using defaults", e);
            settings = Settings::default();
        }
        apply_theme(prefs.theme);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new_cyclic(|weak: &Weak<RefCell<Game>>| {
            let weak = weak.clone();
            let callback = Closure::<dyn FnMut()>::new(move || on_tick(&weak));
            let sim = SimulationLoop::new(settings, IntervalScheduler::new(callback), seed)
                .expect("settings were validated");
            RefCell::new(Game { sim, prefs })
        });

        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        setup_menu(game);

        log::info!("Neon Snake ready!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(heading) = heading_for_key(&event.key()) {
                if event.key().starts_with("Arrow") {
                    event.prevent_default();
                }
                game.borrow_mut().sim.request_heading(heading);
            }
        });
        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    fn on_click(id: &str, game: &Rc<RefCell<Game>>, handler: impl Fn(&mut Game) + 'static) {
        let Some(el) = document().get_element_by_id(id) else {
            log::warn!("Missing #{}", id);
            return;
        };
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            handler(&mut game.borrow_mut());
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_menu(game: Rc<RefCell<Game>>) {
        on_click("start-btn", &game, |g| {
            set_hidden("main-menu", true);
            set_hidden("game-container", false);
            g.restart();
        });
        on_click("restart-btn", &game, |g| g.restart());
        on_click("back-btn", &game, |g| {
            g.sim.stop();
            set_hidden("game-container", true);
            set_hidden("main-menu", false);
        });
        on_click("toggle-theme-btn", &game, |g| g.toggle_theme());
        on_click("rankings-btn", &game, |_| {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message("Rankings feature coming soon!");
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Headless runner: plays one game with a greedy steering input
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use neon_snake::platform::{ManualScheduler, TickScheduler};
    use neon_snake::sim::{Cell, GameEvent, GridModel, Heading, SimulationLoop, cell_ahead};

    /// Safety valve for games that never end
    pub const MAX_TICKS: u64 = 20_000;

    /// Shortest per-axis distance on a wraparound grid
    fn wrapped_distance(a: Cell, b: Cell, grid: &GridModel) -> i32 {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        dx.min(grid.cols - dx) + dy.min(grid.rows - dy)
    }

    /// Pick the non-reversing heading that is free next tick and closest to
    /// the food. `None` when every option collides.
    pub fn steer(sim: &SimulationLoop<ManualScheduler>) -> Option<Heading> {
        let grid = sim.grid();
        let snake = sim.snake();
        let food = sim.food().position;
        Heading::ALL
            .into_iter()
            .filter(|h| !h.is_reverse_of(sim.current_heading()))
            .map(|h| (h, cell_ahead(snake, h, grid)))
            .filter(|(_, cell)| !snake.occupies(*cell))
            .min_by_key(|(_, cell)| wrapped_distance(*cell, food, grid))
            .map(|(h, _)| h)
    }

    /// Play until game over or `MAX_TICKS`. Returns the final score.
    pub fn play(sim: &mut SimulationLoop<ManualScheduler>) -> u32 {
        sim.start();
        let mut elapsed_ms: u64 = 0;

        while let Some(interval) = sim.scheduler().active_interval() {
            if sim.ticks() >= MAX_TICKS {
                log::warn!("Tick limit reached, stopping");
                sim.stop();
                break;
            }
            if let Some(heading) = steer(sim) {
                sim.request_heading(heading);
            }
            elapsed_ms += u64::from(interval);

            for event in sim.tick() {
                match event {
                    GameEvent::Moved { head } => log::trace!("Head at ({}, {})", head.x, head.y),
                    GameEvent::Ate { score } => log::debug!("Ate, score {}", score),
                    GameEvent::SpedUp { interval_ms } => {
                        log::info!("Speed up at {}ms game time: {}ms per tick", elapsed_ms, interval_ms)
                    }
                    GameEvent::GameOver { final_score, reason } => {
                        log::info!(
                            "Game over ({:?}) after {} ticks, {:.1}s of game time",
                            reason,
                            sim.ticks(),
                            elapsed_ms as f64 / 1000.0
                        );
                        return final_score;
                    }
                }
            }
        }
        sim.score()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_snake::Settings;
    use neon_snake::platform::ManualScheduler;
    use neon_snake::sim::SimulationLoop;

    env_logger::init();
    log::info!("Neon Snake (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::from_file(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::load(),
    };
    let seed = match args.next() {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Seed {:?} is not a number, using 0", raw);
            0
        }),
        None => 0,
    };

    let mut sim = match SimulationLoop::new(settings, ManualScheduler::new(), seed) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            std::process::exit(1);
        }
    };

    let score = headless::play(&mut sim);
    println!("Final score: {}", score);
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::headless::*;
    use neon_snake::Settings;
    use neon_snake::platform::ManualScheduler;
    use neon_snake::sim::{GamePhase, SimulationLoop};

    #[test]
    fn test_headless_game_terminates() {
        let mut sim = SimulationLoop::new(Settings::default(), ManualScheduler::new(), 42).unwrap();
        let score = play(&mut sim);
        assert_eq!(score, sim.score());
        assert!(sim.phase() == GamePhase::GameOver || sim.ticks() >= MAX_TICKS);
        // Greedy steering eats at least the first few pieces on an open board
        assert!(score > 0);
    }

    #[test]
    fn test_steer_avoids_reversal() {
        let mut sim = SimulationLoop::new(Settings::default(), ManualScheduler::new(), 7).unwrap();
        sim.start();
        let heading = steer(&sim).unwrap();
        assert!(!heading.is_reverse_of(sim.current_heading()));
    }
}
