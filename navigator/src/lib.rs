pub mod direction;
pub mod error;
pub mod maze;
pub mod policies;
pub mod port;
pub mod random;
pub mod sim;

pub use direction::{CellState, Heading, RelativeDirection, rotation_offset};
pub use error::{PolicyError, Result};
pub use port::{AgentPort, PortError};
