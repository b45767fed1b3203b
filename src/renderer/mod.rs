//! Rendering geometry
//!
//! The simulation hands out plain cells; this module maps them onto the
//! canvas for whatever draws them.

pub mod shapes;

pub use shapes::{Circle, FrameShapes, Rect, frame_shapes};
