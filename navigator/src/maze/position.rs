use std::fmt;

use crate::direction::Heading;

/// grid coordinate: `x` grows east, `y` grows south
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn to_index(self, width: usize) -> usize {
        self.y * width + self.x
    }

    pub fn from_index(index: usize, width: usize) -> Self {
        Self::new(index % width, index / width)
    }

    pub fn manhattan_distance(self, other: Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// neighbour one cell towards `heading`, `None` when it would leave the first quadrant
    pub fn step(self, heading: Heading) -> Option<Self> {
        match heading {
            Heading::North if self.y > 0 => Some(Self::new(self.x, self.y - 1)),
            Heading::South => Some(Self::new(self.x, self.y + 1)),
            Heading::West if self.x > 0 => Some(Self::new(self.x - 1, self.y)),
            Heading::East => Some(Self::new(self.x + 1, self.y)),
            _ => None,
        }
    }

    pub fn neighbors(self) -> impl Iterator<Item = (Self, Heading)> {
        Heading::ALL
            .into_iter()
            .filter_map(move |heading| self.step(heading).map(|pos| (pos, heading)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
