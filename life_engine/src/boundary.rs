use crate::error::BoundaryError;
use crate::grid::Grid;

/// The smallest rectangle containing every live cell of a grid.
///
/// All bounds are inclusive.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct BoundingBox {
    pub top: usize,
    pub bottom: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl BoundingBox {
    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }

    /// Checks that the box is well formed and lies inside `grid`.
    pub fn check(&self, grid: &Grid) -> Result<(), BoundaryError> {
        if self.top > self.bottom || self.min_col > self.max_col {
            return Err(BoundaryError::Inverted { bbox: *self });
        }

        if self.bottom >= grid.height() || self.max_col >= grid.width() {
            return Err(BoundaryError::OutOfBounds {
                bbox: *self,
                width: grid.width(),
                height: grid.height(),
            });
        }

        Ok(())
    }
}

/// Finds the bounding box of the live cells in `grid`.
///
/// Returns `None` when the grid has no live cells since there is nothing to bound.
pub fn find_boundary(grid: &Grid) -> Option<BoundingBox> {
    let has_life = |row: &usize| grid.row(*row).iter().any(|cell| cell.is_alive());

    let top = (0..grid.height()).find(has_life)?;
    let bottom = (top..grid.height()).rev().find(has_life)?;

    let mut min_col = usize::MAX;
    let mut max_col = 0;
    for row in top..=bottom {
        let cells = grid.row(row);
        if let (Some(first), Some(last)) = (
            cells.iter().position(|cell| cell.is_alive()),
            cells.iter().rposition(|cell| cell.is_alive()),
        ) {
            min_col = min_col.min(first);
            max_col = max_col.max(last);
        }

        // The box already spans the full width
        if min_col == 0 && max_col + 1 == grid.width() {
            break;
        }
    }

    Some(BoundingBox {
        top,
        bottom,
        min_col,
        max_col,
    })
}

impl Grid {
    /// Copies the part of the grid inside `bbox`.
    pub fn crop(&self, bbox: &BoundingBox) -> Result<Grid, BoundaryError> {
        bbox.check(self)?;

        let mut cropped = Grid::new(bbox.width(), bbox.height());
        for (row, cells) in (bbox.top..=bbox.bottom).map(|row| self.row(row)).enumerate() {
            for (col, cell) in cells[bbox.min_col..=bbox.max_col].iter().enumerate() {
                cropped.set(row, col, *cell);
            }
        }

        Ok(cropped)
    }
}
