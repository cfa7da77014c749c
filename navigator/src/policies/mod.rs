mod homing;
mod lifecycle;
mod random_walk;
pub mod traits;

pub use homing::{
    Homing, HomingConfig, goal_headings, open_headings, target_horizontal_sign,
    target_vertical_sign,
};
pub use lifecycle::{CancelHandle, PolicyState};
pub use random_walk::{REPLAN_DRAW, RandomWalk, RandomWalkConfig};
pub use traits::{MoveTally, NavigationPolicy, Outcome, RunSummary};
