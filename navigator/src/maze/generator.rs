use rand::{Rng, seq::SliceRandom};

use super::{
    cell::Cell,
    grid::{Maze, ParsedMaze},
    position::Position,
};
use crate::direction::Heading;

impl Maze {
    /// randomized prim: carves a perfect maze on the odd cells of a walled grid
    ///
    /// even dimensions are rounded down to the next odd size so the outer ring
    /// stays solid. the start and target are distinct random passages.
    pub fn generate(width: usize, height: usize, rng: &mut impl Rng) -> eyre::Result<ParsedMaze> {
        if width < 5 || height < 3 {
            eyre::bail!("maze too small: {}x{} (need at least 5x3)", width, height);
        }
        let width = if width % 2 == 0 { width - 1 } else { width };
        let height = if height % 2 == 0 { height - 1 } else { height };

        let mut maze = Maze::filled(width, height, Cell::Wall);
        let inside = |pos: Position| pos.x > 0 && pos.y > 0 && pos.x < width - 1 && pos.y < height - 1;

        let seed = Position::new(
            2 * rng.gen_range(0..(width - 1) / 2) + 1,
            2 * rng.gen_range(0..(height - 1) / 2) + 1,
        );
        maze.set(seed, Cell::Passage);

        let mut frontier: Vec<Position> = cells_two_away(seed)
            .filter(|&(pos, _)| inside(pos))
            .map(|(pos, _)| pos)
            .collect();

        while !frontier.is_empty() {
            let cell = frontier.swap_remove(rng.gen_range(0..frontier.len()));
            if maze.is_walkable(cell) {
                continue;
            }

            let carved: Vec<Heading> = cells_two_away(cell)
                .filter(|&(pos, _)| inside(pos) && maze.is_walkable(pos))
                .map(|(_, heading)| heading)
                .collect();

            let Some(&heading) = carved.choose(rng) else {
                continue;
            };

            maze.set(cell, Cell::Passage);
            if let Some(between) = cell.step(heading) {
                maze.set(between, Cell::Passage);
            }

            frontier.extend(
                cells_two_away(cell)
                    .filter(|&(pos, _)| inside(pos) && !maze.is_walkable(pos))
                    .map(|(pos, _)| pos),
            );
        }

        let passages: Vec<Position> = maze.passages().collect();
        let mut picks = passages.choose_multiple(rng, 2);
        let start = picks.next().copied();
        let target = picks.next().copied();

        log::trace!(
            "generated {}x{} maze with {} passages",
            width,
            height,
            passages.len()
        );

        Ok(ParsedMaze {
            maze,
            start,
            target,
        })
    }
}

/// cells two steps away, paired with the heading that leads to them
fn cells_two_away(pos: Position) -> impl Iterator<Item = (Position, Heading)> {
    Heading::ALL.into_iter().filter_map(move |heading| {
        pos.step(heading)
            .and_then(|p| p.step(heading))
            .map(|p| (p, heading))
    })
}
