//! The snake: ordered body cells plus delayed growth

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::{Cell, GridModel, Heading};

/// Outcome of moving the snake one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceResult {
    Moved,
    /// The new head landed on the body; the body was left untouched
    Collided,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    /// Head first, most recently occupied cell first
    body: VecDeque<Cell>,
    /// Ticks that keep the tail instead of dropping it
    grow_pending: u32,
}

impl Snake {
    /// A single-cell snake
    pub fn new(head: Cell) -> Self {
        Self {
            body: VecDeque::from([head]),
            grow_pending: 0,
        }
    }

    /// Build a snake from explicit cells, head first.
    /// Returns `None` for an empty body.
    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self {
            body,
            grow_pending: 0,
        })
    }

    #[inline]
    pub fn head(&self) -> Cell {
        // body is never empty
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn grow_pending(&self) -> u32 {
        self.grow_pending
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Queue one cell of growth for a later advance
    pub fn grow(&mut self) {
        self.grow_pending += 1;
    }

    /// Move one cell in `heading`, wrapping around the grid.
    ///
    /// Collision is checked against the pre-move body, tail included, so
    /// chasing the tail into the cell it is about to vacate still collides.
    /// Reversals are not filtered here.
    pub fn advance(&mut self, heading: Heading, grid: &GridModel) -> AdvanceResult {
        let new_head = grid.wrap(self.head() + heading.delta());

        if self.occupies(new_head) {
            return AdvanceResult::Collided;
        }

        self.body.push_front(new_head);
        if self.grow_pending > 0 {
            self.grow_pending -= 1;
        } else {
            self.body.pop_back();
        }

        AdvanceResult::Moved
    }
}
