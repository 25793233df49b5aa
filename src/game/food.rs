use rand::Rng;

use super::grid::Grid;
use super::state::Position;

/// The single piece of food on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Food at a cell not covered by `occupied`
    pub fn spawn<R: Rng + ?Sized>(occupied: &[Position], grid: &Grid, rng: &mut R) -> Self {
        let mut food = Self::new(Self::generate_position(grid, rng));
        food.respawn(occupied, grid, rng);
        food
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Uniformly random cell, ignoring what occupies it
    pub fn generate_position<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Position {
        grid.random_cell(rng)
    }

    /// Move to a random cell outside `occupied`
    ///
    /// Re-rolls until a free cell comes up. When `occupied` covers the whole
    /// grid there is nowhere to go: the food stays put and this returns false.
    pub fn respawn<R: Rng + ?Sized>(
        &mut self,
        occupied: &[Position],
        grid: &Grid,
        rng: &mut R,
    ) -> bool {
        if grid.cells().all(|cell| occupied.contains(&cell)) {
            return false;
        }

        loop {
            let candidate = Self::generate_position(grid, rng);
            if !occupied.contains(&candidate) {
                self.position = candidate;
                return true;
            }
        }
    }
}
