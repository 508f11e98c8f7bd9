use crossterm::style::Color;

/// The state of a single cell on the grid.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    /// Parses an RLE cell tag, `b` for a dead cell and `o` for a live one.
    pub fn from_tag(tag: char) -> Option<Cell> {
        match tag {
            'b' => Some(Cell::Dead),
            'o' => Some(Cell::Alive),
            _ => None,
        }
    }

    /// Parses the character used when drawing a grid, `.` for a dead cell and `O` for a live one.
    pub fn from_char(value: char) -> Option<Cell> {
        match value {
            '.' => Some(Cell::Dead),
            'O' => Some(Cell::Alive),
            _ => None,
        }
    }

    pub fn tag(self) -> char {
        match self {
            Cell::Dead => 'b',
            Cell::Alive => 'o',
        }
    }

    pub fn char(self) -> char {
        match self {
            Cell::Dead => '.',
            Cell::Alive => 'O',
        }
    }

    pub fn color(self) -> Color {
        match self {
            Cell::Dead => Color::DarkGrey,
            Cell::Alive => Color::Green,
        }
    }

    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Dead => 0,
            Cell::Alive => 1,
        }
    }
}
