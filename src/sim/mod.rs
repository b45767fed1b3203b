//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per tick, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod food;
pub mod grid;
pub mod snake;
pub mod state;
pub mod tick;

pub use food::Food;
pub use grid::{Cell, GridModel, Heading};
pub use snake::{AdvanceResult, Snake};
pub use state::{GameEvent, GameOverReason, GamePhase, RenderFrame, RngState};
pub use tick::{SimulationLoop, cell_ahead};
