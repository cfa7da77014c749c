mod cell;
mod generator;
mod grid;
mod position;

pub use cell::{Cell, Marker};
pub use grid::{Maze, ParsedMaze};
pub use position::Position;
