//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Ticks (periodic scheduling)
//! - Input events (keyboard to heading)

pub mod input;
pub mod time;

pub use input::heading_for_key;
pub use time::{ManualScheduler, TickScheduler};

#[cfg(target_arch = "wasm32")]
pub use time::IntervalScheduler;
