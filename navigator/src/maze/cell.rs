use crate::direction::CellState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Passage,
    Wall,
}

/// a cell as written in a map file, including the start and target markers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Cell(Cell),
    Start,
    Target,
}

impl Marker {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' | 'f' | ' ' => Some(Self::Cell(Cell::Passage)),
            '#' | 'b' => Some(Self::Cell(Cell::Wall)),
            'r' | 'S' => Some(Self::Start),
            't' | 'T' => Some(Self::Target),
            _ => None,
        }
    }

    /// start and target cells are walkable
    pub fn cell(self) -> Cell {
        match self {
            Self::Cell(cell) => cell,
            Self::Start | Self::Target => Cell::Passage,
        }
    }
}

impl Cell {
    pub fn is_walkable(self) -> bool {
        matches!(self, Self::Passage)
    }
}

impl From<Cell> for CellState {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Passage => Self::Passage,
            Cell::Wall => Self::Wall,
        }
    }
}
