use crate::cell::Cell;
use crossterm::{
    cursor::Hide,
    execute,
    style::{Color, Print, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::io::{self, stdout, Write};
use tracing::debug;

/// Offsets of the 8 cells in the Moore neighborhood.
const NEIGHBORHOOD: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A bounded rectangular grid of cells.
///
/// Cells are stored row by row. Positions outside the grid are always dead, there is no wraparound.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid where every cell is dead.
    pub fn new(width: usize, height: usize) -> Grid {
        Grid {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        }
    }

    /// Creates a grid from its cells in row order.
    ///
    /// Returns `None` if the number of cells does not match the dimensions.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Option<Grid> {
        if cells.len() != width * height {
            return None;
        }

        Some(Grid {
            width,
            height,
            cells,
        })
    }

    /// Creates a grid from a picture made of `.` (dead) and `O` (alive), one line per row.
    ///
    /// Leading and trailing whitespace on each line is ignored, as are blank lines.
    /// Returns `None` if the rows have different lengths or an unknown character is found.
    pub fn from_picture(picture: &str) -> Option<Grid> {
        let rows = picture
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(Cell::from_char).collect::<Option<Vec<_>>>())
            .collect::<Option<Vec<_>>>()?;

        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }

        let height = rows.len();
        Grid::from_cells(width, height, rows.into_iter().flatten().collect())
    }

    /// Creates a square grid of `size × size` cells where each cell is alive with the given probability.
    ///
    /// The same seed always produces the same grid.
    pub fn random(size: usize, alive_probability: f64, seed: u64) -> Grid {
        let mut rng = StdRng::seed_from_u64(seed);
        let cells = (0..size * size)
            .map(|_| Cell::from(rng.gen::<f64>() < alive_probability))
            .collect();

        Grid {
            width: size,
            height: size,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.cells[row * self.width + col])
    }

    /// Sets the cell at the given location.
    ///
    /// # Panics
    /// Panics if the location is outside the grid.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        assert!(
            row < self.height && col < self.width,
            "({row}, {col}) is outside a {}x{} grid",
            self.height,
            self.width
        );
        self.cells[row * self.width + col] = cell;
    }

    /// Returns the cell at a location that may lie outside the grid, in which case it is dead.
    pub fn cell_at(&self, row: isize, col: isize) -> Cell {
        match (usize::try_from(row), usize::try_from(col)) {
            (Ok(row), Ok(col)) => self.get(row, col).unwrap_or_default(),
            _ => Cell::Dead,
        }
    }

    /// Counts the live cells in the Moore neighborhood of a location.
    ///
    /// The location itself may be outside the grid. Neighbors outside the grid count as dead.
    pub fn live_neighbors(&self, row: isize, col: isize) -> u8 {
        NEIGHBORHOOD
            .iter()
            .filter(|(d_row, d_col)| {
                match (row.checked_add(*d_row), col.checked_add(*d_col)) {
                    (Some(row), Some(col)) => self.cell_at(row, col).is_alive(),
                    _ => false,
                }
            })
            .count() as u8
    }

    /// # Panics
    /// Panics if `row` is outside the grid.
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        (0..self.height).map(move |row| self.row(row))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Whether the grid has no live cells.
    pub fn is_dead(&self) -> bool {
        !self.cells.iter().any(|cell| cell.is_alive())
    }

    /// Surrounds the grid with `rings` borders of dead cells.
    ///
    /// Each ring adds one row above, one row below, one column to the left and one column to the right,
    /// so the content ends up offset by `rings` in both axes.
    pub fn resize(&self, rings: usize) -> Grid {
        if rings == 0 {
            return self.clone();
        }

        let mut resized = Grid::new(self.width + 2 * rings, self.height + 2 * rings);
        for (row, cells) in self.rows().enumerate() {
            let start = (row + rings) * resized.width + rings;
            resized.cells[start..start + self.width].copy_from_slice(cells);
        }

        resized
    }

    /// Grows the grid until both dimensions are at least `size`.
    ///
    /// Rings are added evenly so one axis may end up larger than `size`.
    pub fn resize_to(&self, size: usize) -> Grid {
        let rings = resize_rings(self, size);
        debug!(
            width = self.width,
            height = self.height,
            size,
            rings,
            "Resizing grid for display"
        );
        self.resize(rings)
    }

    /// Draws the grid to the console below the given title.
    pub fn draw(&self, title: &str) -> io::Result<()> {
        let mut stdout = stdout();

        execute!(stdout, Clear(ClearType::All), Hide, Print(title), Print("\n\n"))?;

        for cells in self.rows() {
            for cell in cells {
                execute!(
                    stdout,
                    SetForegroundColor(cell.color()),
                    Print(cell.char()),
                    SetForegroundColor(Color::Reset)
                )?;
            }
            execute!(stdout, Print("\n"))?;
        }

        stdout.flush()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cells in self.rows() {
            let line: String = cells.iter().map(|cell| cell.char()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// The number of dead rings needed so that both dimensions of the grid reach `size`.
///
/// This is the larger of the two per-axis deficits, or 0 if the grid is already big enough.
pub fn resize_rings(grid: &Grid, size: usize) -> usize {
    size.saturating_sub(grid.height).max(size.saturating_sub(grid.width))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glider() -> Grid {
        Grid::from_picture(
            "
            .O.
            ..O
            OOO",
        )
        .unwrap()
    }

    #[test]
    fn when_creating_a_grid_every_cell_is_dead() {
        let grid = Grid::new(4, 3);

        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.population(), 0);
        assert!(grid.is_dead());
    }

    #[test]
    fn when_parsing_a_picture_the_cells_are_placed_row_by_row() {
        let grid = glider();

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(0, 0), Some(Cell::Dead));
        assert_eq!(grid.get(0, 1), Some(Cell::Alive));
        assert_eq!(grid.get(1, 2), Some(Cell::Alive));
        assert_eq!(grid.get(2, 0), Some(Cell::Alive));
        assert_eq!(grid.population(), 5);
        assert_eq!(grid.cells()[..3], [Cell::Dead, Cell::Alive, Cell::Dead]);
    }

    #[test]
    fn when_parsing_a_ragged_picture_no_grid_is_created() {
        assert!(Grid::from_picture("OO\nO").is_none());
        assert!(Grid::from_picture("O*").is_none());
    }

    #[test]
    fn when_creating_a_grid_from_the_wrong_number_of_cells_no_grid_is_created() {
        assert!(Grid::from_cells(2, 2, vec![Cell::Alive; 3]).is_none());
        assert!(Grid::from_cells(2, 2, vec![Cell::Alive; 4]).is_some());
    }

    #[test]
    fn when_getting_a_cell_outside_the_grid_none_is_returned() {
        let grid = glider();

        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 3), None);
        assert_eq!(grid.cell_at(-1, 0), Cell::Dead);
        assert_eq!(grid.cell_at(0, -1), Cell::Dead);
        assert_eq!(grid.cell_at(2, 2), Cell::Alive);
    }

    #[test]
    fn when_setting_a_cell_the_grid_is_updated() {
        let mut grid = Grid::new(2, 2);
        grid.set(1, 0, Cell::Alive);

        assert_eq!(grid.get(1, 0), Some(Cell::Alive));
        assert_eq!(grid.population(), 1);
    }

    #[test]
    #[should_panic]
    fn when_setting_a_cell_outside_the_grid_a_panic_occurs() {
        let mut grid = Grid::new(2, 2);
        grid.set(2, 0, Cell::Alive);
    }

    #[test]
    fn when_counting_neighbors_in_the_middle_all_8_directions_are_checked() {
        let grid = Grid::from_picture(
            "
            OOO
            OOO
            OOO",
        )
        .unwrap();

        assert_eq!(grid.live_neighbors(1, 1), 8);
    }

    #[test]
    fn when_counting_neighbors_at_a_corner_off_grid_positions_are_dead() {
        let grid = Grid::from_picture(
            "
            OO.
            OO.
            ...",
        )
        .unwrap();

        assert_eq!(grid.live_neighbors(0, 0), 3);
        assert_eq!(grid.live_neighbors(2, 2), 1);
    }

    #[test]
    fn when_counting_neighbors_the_grid_does_not_wrap_around() {
        let grid = Grid::from_picture(
            "
            O..O
            ....
            ....
            O..O",
        )
        .unwrap();

        assert_eq!(grid.live_neighbors(0, 0), 0);
        assert_eq!(grid.live_neighbors(3, 3), 0);
    }

    #[test]
    fn when_counting_neighbors_of_a_location_outside_the_grid_only_in_bounds_cells_count() {
        let grid = Grid::from_picture(
            "
            O.
            .O",
        )
        .unwrap();

        assert_eq!(grid.live_neighbors(-1, -1), 1);
        assert_eq!(grid.live_neighbors(-1, 0), 1);
        assert_eq!(grid.live_neighbors(2, 2), 1);
        assert_eq!(grid.live_neighbors(-5, 7), 0);
        assert_eq!(grid.live_neighbors(isize::MAX, 0), 0);
        assert_eq!(grid.live_neighbors(isize::MIN, isize::MAX), 0);
        assert_eq!(grid.live_neighbors(0, isize::MIN), 0);
    }

    #[test]
    fn when_resizing_a_grid_the_content_is_offset_by_the_number_of_rings() {
        let grid = glider();
        let resized = grid.resize(2);

        assert_eq!(resized.width(), 7);
        assert_eq!(resized.height(), 7);
        assert_eq!(resized.population(), grid.population());

        for row in 0..grid.height() {
            for col in 0..grid.width() {
                assert_eq!(resized.get(row + 2, col + 2), grid.get(row, col));
            }
        }
    }

    #[test]
    fn when_resizing_a_grid_the_new_borders_are_dead() {
        let grid = Grid::from_picture("OO\nOO").unwrap();
        let resized = grid.resize(1);

        assert_eq!(
            resized,
            Grid::from_picture(
                "
                ....
                .OO.
                .OO.
                ...."
            )
            .unwrap()
        );
    }

    #[test]
    fn when_resizing_by_zero_rings_the_grid_is_unchanged() {
        let grid = glider();

        assert_eq!(grid.resize(0), grid);
    }

    #[test]
    fn when_resizing_an_empty_grid_only_dead_cells_are_added() {
        let resized = Grid::new(0, 0).resize(1);

        assert_eq!(resized.width(), 2);
        assert_eq!(resized.height(), 2);
        assert!(resized.is_dead());
    }

    #[test]
    fn when_computing_rings_for_a_display_size_the_largest_deficit_is_used() {
        assert_eq!(resize_rings(&Grid::new(3, 5), 10), 7);
        assert_eq!(resize_rings(&Grid::new(5, 3), 10), 7);
        assert_eq!(resize_rings(&Grid::new(20, 3), 10), 7);
        assert_eq!(resize_rings(&Grid::new(10, 10), 10), 0);
        assert_eq!(resize_rings(&Grid::new(12, 15), 10), 0);
    }

    #[test]
    fn when_resizing_to_a_display_size_both_axes_reach_it() {
        let resized = Grid::new(2, 4).resize_to(6);

        assert_eq!(resized.width(), 10);
        assert_eq!(resized.height(), 12);
    }

    #[test]
    fn when_generating_a_random_grid_the_same_seed_gives_the_same_grid() {
        let a = Grid::random(16, 0.6, 42);
        let b = Grid::random(16, 0.6, 42);

        assert_eq!(a.width(), 16);
        assert_eq!(a.height(), 16);
        assert_eq!(a, b);
    }

    #[test]
    fn when_generating_a_random_grid_the_probability_bounds_are_respected() {
        assert!(Grid::random(8, 0.0, 1).is_dead());
        assert_eq!(Grid::random(8, 1.0, 1).population(), 64);
    }

    #[test]
    fn when_displaying_a_grid_each_row_is_a_line() {
        assert_eq!(glider().to_string(), ".O.\n..O\nOOO\n");
    }
}
