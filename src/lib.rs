//! Neon Snake - a tick-driven snake game on a wraparound grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, snake, food, tick loop)
//! - `renderer`: Cell-to-pixel geometry for the 2D drawing surface
//! - `platform`: Keyboard mapping and tick schedulers
//! - `settings`: Data-driven tuning and preferences

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{ConfigError, Settings, Theme};

/// Game configuration constants
pub mod consts {
    /// Pixel size of one grid cell
    pub const CELL_SCALE: u32 = 20;

    /// Default canvas dimensions (30 x 20 cells)
    pub const CANVAS_WIDTH: u32 = 600;
    pub const CANVAS_HEIGHT: u32 = 400;

    /// Tick interval at game start
    pub const BASE_TICK_MS: u32 = 100;
    /// Longest accepted starting interval (one minute)
    pub const MAX_TICK_MS: u32 = 60_000;
    /// Interval reduction applied at each speed milestone
    pub const SPEEDUP_STEP_MS: u32 = 10;
    /// Interval never drops below this
    pub const MIN_TICK_MS: u32 = 40;
    /// Score cadence of speed milestones
    pub const SPEEDUP_EVERY: u32 = 5;

    /// Random draws before food placement falls back to a full scan
    pub const FOOD_ATTEMPTS: u32 = 64;
}
