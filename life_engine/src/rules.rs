//! The B3/S23 transition rule of Conway's Game of Life.

use crate::cell::Cell;
use crate::grid::Grid;

/// The state of a cell in the next generation given its current state and live neighbor count.
///
/// A live cell survives with 2 or 3 live neighbors and dies otherwise.
/// A dead cell is born with exactly 3 live neighbors and stays dead otherwise.
pub fn next_state(cell: Cell, live_neighbors: u8) -> Cell {
    match (cell, live_neighbors) {
        (Cell::Alive, 2 | 3) => Cell::Alive,
        (Cell::Dead, 3) => Cell::Alive,
        _ => Cell::Dead,
    }
}

/// Computes the next generation of `grid`.
pub fn step(grid: &Grid) -> Grid {
    let mut next = Grid::new(grid.width(), grid.height());
    step_into(grid, &mut next);
    next
}

/// Computes the next generation of `grid` into `next`, reusing its storage.
///
/// Every cell is computed from `grid` alone so no cell sees a neighbor already updated in this pass.
/// `next` is resized to the dimensions of `grid` if they differ.
pub fn step_into(grid: &Grid, next: &mut Grid) {
    if next.width() != grid.width() || next.height() != grid.height() {
        *next = Grid::new(grid.width(), grid.height());
    }

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let cell = grid.row(row)[col];
            let neighbors = grid.live_neighbors(row as isize, col as isize);
            next.set(row, col, next_state(cell, neighbors));
        }
    }
}

impl Grid {
    /// Computes the next generation of this grid.
    pub fn step(&self) -> Grid {
        step(self)
    }
}
