use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::{Duration, Instant};

use crate::{
    direction::RelativeDirection,
    error::{PolicyError, Result},
    port::AgentPort,
};

use super::traits::{MoveTally, Outcome, RunSummary};

/// shared view of a policy's `active` flag
///
/// clones may be handed to other threads; `reset` only ever clears the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    active: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn reset(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn arm(&self) {
        self.active.store(true, Ordering::SeqCst);
    }
}

/// per-instance lifecycle: the cancellation flag and the pacing delay
#[derive(Debug, Default)]
pub struct PolicyState {
    active: CancelHandle,
    delay_ms: u64,
}

impl PolicyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_delay(&mut self, millis: i64) -> Result<()> {
        self.delay_ms = u64::try_from(millis).map_err(|_| {
            PolicyError::InvalidConfiguration(format!("delay must not be negative, got {millis}ms"))
        })?;
        Ok(())
    }

    pub fn delay(&self) -> u64 {
        self.delay_ms
    }

    pub fn is_active(&self) -> bool {
        self.active.is_active()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.active.clone()
    }

    /// arms the flag and repeats `step` until the target is reached or the flag is cleared
    ///
    /// `step` performs one sense-decide-act cycle and returns the relative
    /// direction it moved in. dead ends are absorbed here and handed to
    /// `AgentPort::hold`; anything else aborts the run. the flag is clear again
    /// once this returns.
    pub fn run<A, F>(&self, name: &str, agent: &mut A, mut step: F) -> Result<RunSummary>
    where
        A: AgentPort,
        F: FnMut(&mut A) -> Result<RelativeDirection>,
    {
        self.active.arm();

        log::debug!(
            "{}: starting at {} facing {}, target {}",
            name,
            agent.position(),
            agent.heading(),
            agent.target()
        );

        let started = Instant::now();
        let delay = Duration::from_millis(self.delay_ms);
        let mut moves = MoveTally::default();
        let mut dead_ends = 0;
        let mut stuck = false;

        while self.active.is_active() && !agent.at_target() {
            match step(&mut *agent) {
                Ok(direction) => {
                    moves.record(direction);
                    stuck = false;

                    log::trace!(
                        "{} step {}: {} to {}",
                        name,
                        moves.total(),
                        direction,
                        agent.position()
                    );

                    if !delay.is_zero() {
                        agent.pause(delay);
                    }
                }
                Err(PolicyError::DeadEnd { position }) => {
                    dead_ends += 1;
                    if !stuck {
                        log::warn!("{}: dead end at {}, holding position", name, position);
                        stuck = true;
                    }
                    agent.hold(delay);
                }
                Err(e) => {
                    self.active.reset();
                    log::error!("{}: aborting after {} steps: {}", name, moves.total(), e);
                    return Err(e);
                }
            }
        }

        self.active.reset();

        let outcome = if agent.at_target() {
            Outcome::Reached
        } else {
            Outcome::Cancelled
        };

        let summary = RunSummary {
            outcome,
            steps: moves.total(),
            moves,
            dead_ends,
            elapsed: started.elapsed(),
        };

        match outcome {
            Outcome::Reached => log::debug!("{}: reached target in {} steps", name, summary.steps),
            Outcome::Cancelled => log::debug!("{}: cancelled after {} steps", name, summary.steps),
        }

        Ok(summary)
    }
}
