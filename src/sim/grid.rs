//! Grid geometry for the playfield
//!
//! The grid is toroidal: stepping off one edge re-enters from the opposite
//! edge at the same orthogonal coordinate. Coordinates follow the canvas,
//! so y grows downward.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::ConfigError;

/// One grid-addressable position
pub type Cell = IVec2;

/// Direction the snake's head moves on the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// Unit step for this heading
    #[inline]
    pub fn delta(self) -> IVec2 {
        match self {
            Heading::Up => IVec2::NEG_Y,
            Heading::Down => IVec2::Y,
            Heading::Left => IVec2::NEG_X,
            Heading::Right => IVec2::X,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    /// True if turning from `other` to `self` would reverse into the neck
    #[inline]
    pub fn is_reverse_of(self, other: Heading) -> bool {
        self.opposite() == other
    }
}

/// Playfield dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridModel {
    pub cols: i32,
    pub rows: i32,
}

impl GridModel {
    pub fn new(cols: i32, rows: i32) -> Self {
        debug_assert!(cols > 0 && rows > 0, "grid must hold at least one cell");
        Self { cols, rows }
    }

    /// Derive the grid from a canvas size and a cell scale (pixels per cell)
    pub fn from_canvas(width_px: u32, height_px: u32, scale: u32) -> Result<Self, ConfigError> {
        if scale == 0 {
            return Err(ConfigError::ZeroScale);
        }
        let cols = width_px / scale;
        let rows = height_px / scale;
        if cols == 0 || rows == 0 {
            return Err(ConfigError::CanvasTooSmall {
                width: width_px,
                height: height_px,
                scale,
            });
        }
        match (i32::try_from(cols), i32::try_from(rows)) {
            (Ok(cols), Ok(rows)) => Ok(Self::new(cols, rows)),
            _ => Err(ConfigError::CanvasTooLarge {
                width: width_px,
                height: height_px,
                scale,
            }),
        }
    }

    /// Toroidal wrap of a possibly out-of-range cell
    #[inline]
    pub fn wrap(&self, cell: Cell) -> Cell {
        IVec2::new(cell.x.rem_euclid(self.cols), cell.y.rem_euclid(self.rows))
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.cols).contains(&cell.x) && (0..self.rows).contains(&cell.y)
    }

    /// Uniformly random in-bounds cell
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        IVec2::new(rng.random_range(0..self.cols), rng.random_range(0..self.rows))
    }

    /// Spawn point of a fresh snake
    pub fn center(&self) -> Cell {
        IVec2::new(self.cols / 2, self.rows / 2)
    }

    /// Total number of cells
    pub fn capacity(&self) -> usize {
        (self.cols as usize) * (self.rows as usize)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let (cols, rows) = (self.cols, self.rows);
        (0..rows).flat_map(move |y| (0..cols).map(move |x| IVec2::new(x, y)))
    }
}
