use std::path::Path;

use super::{
    cell::{Cell, Marker},
    position::Position,
};
use crate::direction::{CellState, Heading};

#[derive(Debug, Clone)]
pub struct Maze {
    grid: Vec<Cell>,
    width: usize,
    height: usize,
}

/// a maze together with the start and target markers found while parsing it
#[derive(Debug, Clone)]
pub struct ParsedMaze {
    pub maze: Maze,
    pub start: Option<Position>,
    pub target: Option<Position>,
}

impl Maze {
    pub fn filled(width: usize, height: usize, cell: Cell) -> Self {
        Self {
            grid: vec![cell; width * height],
            width,
            height,
        }
    }

    pub fn from_flattened(flattened: Vec<String>, shape: Vec<u8>) -> eyre::Result<ParsedMaze> {
        if shape.len() != 2 {
            eyre::bail!("invalid shape: expected [height, width], got {:?}", shape);
        }

        let height = shape[0] as usize;
        let width = shape[1] as usize;

        if flattened.len() != width * height {
            eyre::bail!(
                "grid size mismatch: expected {}, got {}",
                width * height,
                flattened.len()
            );
        }

        let markers = flattened
            .iter()
            .map(|s| {
                let mut chars = s.chars();
                let marker = match (chars.next(), chars.next()) {
                    (Some(c), None) => Marker::from_char(c),
                    _ => None,
                };
                marker.ok_or_else(|| eyre::eyre!("unknown cell code: {:?}", s))
            })
            .collect::<eyre::Result<Vec<_>>>()?;

        Self::from_markers(markers, width, height)
    }

    /// parses one row per line; blank trailing lines are ignored
    pub fn from_text(text: &str) -> eyre::Result<ParsedMaze> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .collect();

        let height = rows.len();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            eyre::bail!("empty maze");
        }

        let mut markers = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                eyre::bail!(
                    "ragged maze: row {} has {} cells, expected {}",
                    y,
                    row.chars().count(),
                    width
                );
            }
            for (x, c) in row.chars().enumerate() {
                let marker = Marker::from_char(c)
                    .ok_or_else(|| eyre::eyre!("unknown cell {:?} at ({}, {})", c, x, y))?;
                markers.push(marker);
            }
        }

        Self::from_markers(markers, width, height)
    }

    pub fn load(path: impl AsRef<Path>) -> eyre::Result<ParsedMaze> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("failed to read {}: {}", path.display(), e))?;
        Self::from_text(&text)
    }

    fn from_markers(markers: Vec<Marker>, width: usize, height: usize) -> eyre::Result<ParsedMaze> {
        let find = |wanted: Marker| -> eyre::Result<Option<Position>> {
            let mut found = markers
                .iter()
                .enumerate()
                .filter(|&(_, &marker)| marker == wanted)
                .map(|(idx, _)| Position::from_index(idx, width));
            let first = found.next();
            if found.next().is_some() {
                eyre::bail!("maze contains more than one {:?} marker", wanted);
            }
            Ok(first)
        };

        let start = find(Marker::Start)?;
        let target = find(Marker::Target)?;
        let grid = markers.into_iter().map(Marker::cell).collect();

        Ok(ParsedMaze {
            maze: Self {
                grid,
                width,
                height,
            },
            start,
            target,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.contains(pos) {
            Some(self.grid[pos.to_index(self.width)])
        } else {
            None
        }
    }

    pub fn set(&mut self, pos: Position, cell: Cell) {
        if self.contains(pos) {
            let idx = pos.to_index(self.width);
            self.grid[idx] = cell;
        }
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(|cell| cell.is_walkable())
    }

    /// state of the neighbour of `pos` towards `heading`; off-grid reads as wall
    pub fn look(&self, pos: Position, heading: Heading) -> CellState {
        pos.step(heading)
            .and_then(|next| self.get(next))
            .map_or(CellState::Wall, CellState::from)
    }

    pub fn passages(&self) -> impl Iterator<Item = Position> + '_ {
        self.grid
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_walkable())
            .map(|(idx, _)| Position::from_index(idx, self.width))
    }

    pub fn neighbors(&self, pos: Position) -> Vec<(Position, Heading)> {
        pos.neighbors()
            .filter(|(p, _)| self.is_walkable(*p))
            .collect()
    }
}
