use thiserror::Error;

use crate::{maze::Position, port::PortError};

#[derive(Error, Debug)]
pub enum PolicyError {
    /// every direction around the agent is walled; the iteration holds position
    #[error("dead end at {position}: no passable direction")]
    DeadEnd { position: Position },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("agent port malfunction: {0}")]
    Port(#[from] PortError),
}

pub type Result<T> = std::result::Result<T, PolicyError>;
