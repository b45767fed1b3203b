//! Tick-driven simulation loop
//!
//! Owns the snake, the food, the score, and the scheduler handle for one
//! game session. Each call to [`SimulationLoop::tick`] advances the game by
//! exactly one cell; the host calls it whenever the scheduler fires.

use rand_pcg::Pcg32;

use super::food::Food;
use super::grid::{Cell, GridModel, Heading};
use super::snake::{AdvanceResult, Snake};
use super::state::{GameEvent, GameOverReason, GamePhase, RenderFrame, RngState};
use crate::platform::TickScheduler;
use crate::settings::{ConfigError, Settings};

/// Heading of a fresh snake
pub const START_HEADING: Heading = Heading::Right;

pub struct SimulationLoop<S: TickScheduler> {
    settings: Settings,
    grid: GridModel,
    scheduler: S,
    rng_state: RngState,
    rng: Pcg32,

    snake: Snake,
    food: Food,
    score: u32,
    tick_interval_ms: u32,
    /// Heading applied by the next advance
    current_heading: Heading,
    /// Latest accepted request, committed at the start of the next tick
    pending_heading: Heading,
    phase: GamePhase,
    game_over_reason: Option<GameOverReason>,
    /// True between `start()` and `stop()`/game over
    ticking: bool,
    /// Ticks processed this game
    ticks: u64,
}

impl<S: TickScheduler> SimulationLoop<S> {
    /// Build a loop with a fresh board. Nothing ticks until [`start`](Self::start).
    pub fn new(settings: Settings, scheduler: S, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        let grid = settings.grid()?;
        let rng_state = RngState::new(seed);
        let rng = rng_state.to_rng();
        let snake = Snake::new(grid.center());

        let mut sim = Self {
            tick_interval_ms: settings.base_tick_ms,
            settings,
            grid,
            scheduler,
            rng_state,
            rng,
            food: Food::at(snake.head()),
            snake,
            score: 0,
            current_heading: START_HEADING,
            pending_heading: START_HEADING,
            phase: GamePhase::Running,
            game_over_reason: None,
            ticking: false,
            ticks: 0,
        };
        sim.reset();
        Ok(sim)
    }

    /// Start a new game: fresh snake at the grid center, fresh food, score
    /// zero, base interval. Any previous schedule is cancelled first.
    pub fn start(&mut self) {
        self.scheduler.cancel();
        self.reset();
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.ticking = true;
        self.scheduler.schedule(self.tick_interval_ms);
        log::info!(
            "Game started on {}x{} grid (seed {}), tick {}ms",
            self.grid.cols,
            self.grid.rows,
            self.rng_state.seed,
            self.tick_interval_ms
        );
    }

    /// Stop ticking and keep the last state for display
    pub fn stop(&mut self) {
        self.scheduler.cancel();
        if self.ticking {
            log::info!("Game stopped at score {}", self.score);
        }
        self.ticking = false;
    }

    /// Request a heading for the next tick.
    ///
    /// A reversal of the current heading is rejected and returns `false`.
    /// Several requests between two ticks coalesce; the last accepted wins.
    pub fn request_heading(&mut self, heading: Heading) -> bool {
        if heading.is_reverse_of(self.current_heading) {
            log::debug!(
                "Rejected reversal {:?} while heading {:?}",
                heading,
                self.current_heading
            );
            return false;
        }
        self.pending_heading = heading;
        true
    }

    /// Advance the game by one step and report what happened.
    ///
    /// Does nothing once stopped or over, so a stale timer callback cannot
    /// touch a finished game.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.ticking || self.phase == GamePhase::GameOver {
            return events;
        }
        self.ticks += 1;
        self.commit_heading();

        if self.snake.advance(self.current_heading, &self.grid) == AdvanceResult::Collided {
            self.end(GameOverReason::Collision, &mut events);
            return events;
        }
        let head = self.snake.head();
        events.push(GameEvent::Moved { head });

        if self.food.is_at(head) {
            self.snake.grow();
            self.score += 1;
            events.push(GameEvent::Ate { score: self.score });

            let placed = self.food.relocate(
                &self.snake,
                &self.grid,
                &mut self.rng,
                self.settings.food_attempts,
            );
            if placed.is_none() {
                self.end(GameOverReason::BoardFull, &mut events);
                return events;
            }

            let next = self.settings.next_interval(self.score, self.tick_interval_ms);
            if next != self.tick_interval_ms {
                self.reschedule(next);
                events.push(GameEvent::SpedUp { interval_ms: next });
            }
        }

        events
    }

    /// Snapshot for the 2D drawing surface
    pub fn frame(&self) -> RenderFrame {
        RenderFrame {
            body: self.snake.body().iter().copied().collect(),
            food: self.food.position,
            score: self.score,
            game_over: self.phase == GamePhase::GameOver,
        }
    }

    /// Replace the board contents, e.g. to set up a scenario.
    /// Score, pace and headings are kept.
    pub fn set_board(&mut self, snake: Snake, food: Food) {
        self.snake = snake;
        self.food = food;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn current_heading(&self) -> Heading {
        self.current_heading
    }

    pub fn pending_heading(&self) -> Heading {
        self.pending_heading
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Rebuild snake, food and counters. The RNG keeps running so every
    /// restart gets a different board while staying reproducible.
    fn reset(&mut self) {
        self.snake = Snake::new(self.grid.center());
        self.score = 0;
        self.ticks = 0;
        self.tick_interval_ms = self.settings.base_tick_ms;
        self.current_heading = START_HEADING;
        self.pending_heading = START_HEADING;
        self.phase = GamePhase::Running;
        self.game_over_reason = None;
        self.ticking = false;

        match Food::spawn(&self.snake, &self.grid, &mut self.rng, self.settings.food_attempts) {
            Some(food) => self.food = food,
            None => {
                // Only a one-cell grid gets here
                log::warn!("No room for food on a {}x{} grid", self.grid.cols, self.grid.rows);
                self.food = Food::at(self.snake.head());
                self.phase = GamePhase::GameOver;
                self.game_over_reason = Some(GameOverReason::BoardFull);
            }
        }
    }

    /// `request_heading` is the only writer of `pending_heading` and checks
    /// it against the same `current_heading`, so the swap needs no recheck.
    fn commit_heading(&mut self) {
        self.current_heading = self.pending_heading;
    }

    /// Swap the periodic schedule for one at `interval_ms`
    fn reschedule(&mut self, interval_ms: u32) {
        self.tick_interval_ms = interval_ms;
        self.scheduler.cancel();
        self.scheduler.schedule(interval_ms);
        log::debug!("Score {}: tick interval now {}ms", self.score, interval_ms);
    }

    fn end(&mut self, reason: GameOverReason, events: &mut Vec<GameEvent>) {
        self.scheduler.cancel();
        self.ticking = false;
        self.phase = GamePhase::GameOver;
        self.game_over_reason = Some(reason);
        log::info!(
            "Game over ({:?}) after {} ticks, score {}",
            reason,
            self.ticks,
            self.score
        );
        events.push(GameEvent::GameOver {
            final_score: self.score,
            reason,
        });
    }
}

/// Cell the head will enter next tick if no turn is made
pub fn cell_ahead(snake: &Snake, heading: Heading, grid: &GridModel) -> Cell {
    grid.wrap(snake.head() + heading.delta())
}
