//! Food placement

use rand::Rng;
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, GridModel};
use super::snake::Snake;

/// The single consumable target on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub position: Cell,
}

impl Food {
    /// Food at a fixed cell
    pub fn at(position: Cell) -> Self {
        Self { position }
    }

    /// Place fresh food off the snake. `None` when the board is full.
    pub fn spawn<R: Rng + ?Sized>(
        snake: &Snake,
        grid: &GridModel,
        rng: &mut R,
        attempts: u32,
    ) -> Option<Self> {
        let mut food = Self::at(grid.center());
        food.relocate(snake, grid, rng, attempts)?;
        Some(food)
    }

    #[inline]
    pub fn is_at(&self, cell: Cell) -> bool {
        self.position == cell
    }

    /// Move the food to a random free cell and return it.
    ///
    /// Up to `attempts` random draws are tried first; after that a free cell
    /// is picked uniformly from a full scan of the grid. Returns `None` and
    /// leaves the position unchanged when the snake covers every cell.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        snake: &Snake,
        grid: &GridModel,
        rng: &mut R,
        attempts: u32,
    ) -> Option<Cell> {
        let drawn = (0..attempts)
            .map(|_| grid.random_cell(rng))
            .find(|cell| !snake.occupies(*cell));

        let cell = match drawn {
            Some(cell) => cell,
            None => {
                log::debug!(
                    "Food placement fell back to scan (snake len {}, grid {}x{})",
                    snake.len(),
                    grid.cols,
                    grid.rows
                );
                grid.cells().filter(|c| !snake.occupies(*c)).choose(rng)?
            }
        };

        self.position = cell;
        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_avoids_snake() {
        let grid = GridModel::new(30, 20);
        let snake = Snake::new(grid.center());
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..200 {
            let food = Food::spawn(&snake, &grid, &mut rng, 64).unwrap();
            assert!(!snake.occupies(food.position));
            assert!(grid.contains(food.position));
        }
    }

    #[test]
    fn test_last_free_cell_is_found() {
        // 2x2 grid, snake covers three cells
        let grid = GridModel::new(2, 2);
        let snake =
            Snake::from_cells([IVec2::new(0, 0), IVec2::new(1, 0), IVec2::new(1, 1)]).unwrap();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut food = Food::at(IVec2::new(0, 0));

        // Even with no random draws the scan finds the hole
        assert_eq!(
            food.relocate(&snake, &grid, &mut rng, 0),
            Some(IVec2::new(0, 1))
        );
        assert!(food.is_at(IVec2::new(0, 1)));
    }

    #[test]
    fn test_full_board_returns_none() {
        let grid = GridModel::new(2, 1);
        let snake = Snake::from_cells([IVec2::new(0, 0), IVec2::new(1, 0)]).unwrap();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut food = Food::at(IVec2::new(1, 0));

        assert_eq!(food.relocate(&snake, &grid, &mut rng, 16), None);
        assert_eq!(food.position, IVec2::new(1, 0));
        assert!(Food::spawn(&snake, &grid, &mut rng, 16).is_none());
    }

    proptest! {
        #[test]
        fn relocated_food_never_overlaps_snake(seed in any::<u64>(), len in 1usize..24, attempts in 0u32..8) {
            // Body fills a 6x4 grid row by row, leaving at least one cell free
            let grid = GridModel::new(6, 4);
            let cells: Vec<_> = grid.cells().take(len).collect();
            let snake = Snake::from_cells(cells).unwrap();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut food = Food::at(IVec2::ZERO);

            let cell = food.relocate(&snake, &grid, &mut rng, attempts);
            prop_assert!(cell.is_some());
            prop_assert!(!snake.occupies(food.position));
        }
    }
}
