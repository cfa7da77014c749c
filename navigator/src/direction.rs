use std::fmt;

/// absolute facing, clockwise from north
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Self::North, Self::East, Self::South, Self::West];

    fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// absolute heading reached by turning `direction` from `self`
    pub fn turned(self, direction: RelativeDirection) -> Self {
        Self::from_index(self.index() + direction.clockwise_steps())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// direction relative to the agent's current heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeDirection {
    Ahead,
    Left,
    Right,
    Behind,
}

impl RelativeDirection {
    pub const ALL: [RelativeDirection; 4] = [Self::Ahead, Self::Left, Self::Right, Self::Behind];

    /// indexed by clockwise quarter turns
    const BY_CLOCKWISE_STEPS: [RelativeDirection; 4] =
        [Self::Ahead, Self::Right, Self::Behind, Self::Left];

    fn clockwise_steps(self) -> usize {
        match self {
            Self::Ahead => 0,
            Self::Right => 1,
            Self::Behind => 2,
            Self::Left => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ahead => "ahead",
            Self::Left => "left",
            Self::Right => "right",
            Self::Behind => "behind",
        }
    }
}

impl fmt::Display for RelativeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// what a sensor reports about a neighbouring cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Passage,
    Wall,
}

impl CellState {
    pub fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// relative turn that takes an agent facing `from` to face `to`
pub fn rotation_offset(from: Heading, to: Heading) -> RelativeDirection {
    let steps = (to.index() + 4 - from.index()) % 4;
    RelativeDirection::BY_CLOCKWISE_STEPS[steps]
}
