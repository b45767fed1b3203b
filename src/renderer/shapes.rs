//! Shape generation for 2D primitives
//!
//! Converts grid cells into canvas pixel geometry. Painting (colors, glow,
//! text) is left to the drawing surface.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Cell, RenderFrame};

/// Gap between the food circle and its cell border, in pixels
pub const FOOD_INSET: f32 = 2.0;

/// Axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// Pixel-space version of a [`RenderFrame`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameShapes {
    /// Snake segments, head first
    pub segments: Vec<Rect>,
    pub food: Circle,
    pub score: u32,
    pub game_over: bool,
}

/// Full-cell square for a snake segment
#[inline]
pub fn cell_rect(cell: Cell, scale: f32) -> Rect {
    Rect {
        min: cell.as_vec2() * scale,
        size: Vec2::splat(scale),
    }
}

/// Circle centred in the cell, inset from its border
#[inline]
pub fn food_circle(cell: Cell, scale: f32) -> Circle {
    Circle {
        center: (cell.as_vec2() + Vec2::splat(0.5)) * scale,
        radius: (scale / 2.0 - FOOD_INSET).max(0.0),
    }
}

/// Generate all shapes for one frame
pub fn frame_shapes(frame: &RenderFrame, scale: f32) -> FrameShapes {
    FrameShapes {
        segments: frame.body.iter().map(|c| cell_rect(*c, scale)).collect(),
        food: food_circle(frame.food, scale),
        score: frame.score,
        game_over: frame.game_over,
    }
}
