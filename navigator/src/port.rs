use std::time::Duration;

use thiserror::Error;

use crate::{
    direction::{CellState, Heading, RelativeDirection, rotation_offset},
    maze::Position,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortError {
    #[error("advanced {heading} from {position} into a wall")]
    BlockedAdvance { position: Position, heading: Heading },

    #[error("agent left the maze at {position}")]
    OutOfBounds { position: Position },
}

/// what a navigation policy needs from the world it moves through
///
/// sensing and turning are relative to the agent's current heading; the only
/// absolute knowledge is the reported heading and the two positions.
pub trait AgentPort {
    /// side-effect free look at the neighbour in `direction`
    fn sense(&self, direction: RelativeDirection) -> CellState;

    fn turn(&mut self, direction: RelativeDirection);

    /// moves one cell along the current heading
    fn advance(&mut self) -> Result<(), PortError>;

    fn heading(&self) -> Heading;

    fn position(&self) -> Position;

    fn target(&self) -> Position;

    fn pause(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }

    /// called instead of a move when a run iteration found no way out
    fn hold(&mut self, delay: Duration) {
        if delay.is_zero() {
            std::thread::yield_now();
        } else {
            self.pause(delay);
        }
    }

    /// looks towards an absolute heading by translating it into a relative sense
    fn sense_heading(&self, heading: Heading) -> CellState {
        self.sense(rotation_offset(self.heading(), heading))
    }

    fn at_target(&self) -> bool {
        self.position() == self.target()
    }
}
