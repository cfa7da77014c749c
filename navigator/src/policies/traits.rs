use std::time::Duration;

use crate::{direction::RelativeDirection, error::Result, port::AgentPort};

use super::lifecycle::{CancelHandle, PolicyState};

pub trait NavigationPolicy {
    /// blocks until the agent reaches its target or the policy is reset
    fn start<A: AgentPort>(&mut self, agent: &mut A) -> Result<RunSummary>;

    fn describe(&self) -> &'static str;

    fn state(&self) -> &PolicyState;

    fn state_mut(&mut self) -> &mut PolicyState;

    /// requests cancellation; observed at the next iteration boundary
    fn reset(&self) {
        self.state().cancel_handle().reset();
    }

    fn set_delay(&mut self, millis: i64) -> Result<()> {
        self.state_mut().set_delay(millis)
    }

    fn delay(&self) -> u64 {
        self.state().delay()
    }

    fn is_active(&self) -> bool {
        self.state().is_active()
    }

    fn cancel_handle(&self) -> CancelHandle {
        self.state().cancel_handle()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Reached,
    Cancelled,
}

/// commanded moves, split by the relative turn taken before each advance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveTally {
    pub ahead: usize,
    pub left: usize,
    pub right: usize,
    pub behind: usize,
}

impl MoveTally {
    pub fn record(&mut self, direction: RelativeDirection) {
        match direction {
            RelativeDirection::Ahead => self.ahead += 1,
            RelativeDirection::Left => self.left += 1,
            RelativeDirection::Right => self.right += 1,
            RelativeDirection::Behind => self.behind += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.ahead + self.left + self.right + self.behind
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub outcome: Outcome,
    pub steps: usize,
    pub moves: MoveTally,
    pub dead_ends: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn reached(&self) -> bool {
        self.outcome == Outcome::Reached
    }
}
