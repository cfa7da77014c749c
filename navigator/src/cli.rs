use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "navigator")]
#[command(about = "Local-sensing maze navigation policies")]
pub struct Args {
    /// Sets the logger's verbosity level
    #[arg(short, long, value_name = "VERBOSITY", default_value_t = LevelFilter::Info)]
    pub verbosity: LevelFilter,

    /// Map file to load ('#' wall, '.' passage, 'r' start, 't' target)
    #[arg(short, long, value_name = "FILE")]
    pub map: Option<PathBuf>,

    /// Width of a generated maze
    #[arg(long, default_value_t = 21)]
    pub width: usize,

    /// Height of a generated maze
    #[arg(long, default_value_t = 21)]
    pub height: usize,

    /// Seed for maze generation and policy randomness (random if omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Delay between moves in milliseconds (0 = no delay)
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub delay: i64,

    /// Cancel a run after this many moves (0 = never)
    #[arg(long, default_value_t = 10_000)]
    pub move_limit: usize,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Random walk: avoid walls, re-plan at random
    Random {
        /// Re-plan on one draw in this many even when the way ahead is open
        #[arg(long, default_value_t = 8)]
        replan_one_in: u32,
    },

    /// Homing: head greedily for the target
    Homing {
        /// Hold position instead of taking any open heading when none closes in
        #[arg(long)]
        no_fallback: bool,
    },

    /// Benchmark mode: run both policies over several generated mazes
    Benchmark {
        /// Number of mazes to run each policy on
        #[arg(short, long, default_value_t = 5)]
        trials: usize,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum PolicyKind {
    RandomWalk,
    Homing,
}

impl PolicyKind {
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::RandomWalk, Self::Homing].into_iter()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::RandomWalk => "Random Walk",
            Self::Homing => "Homing",
        }
    }
}
