use std::cmp::Ordering;

use crate::{
    direction::{Heading, RelativeDirection, rotation_offset},
    error::{PolicyError, Result},
    port::AgentPort,
    random::{RandomSource, StdRandom},
};

use super::{
    lifecycle::PolicyState,
    traits::{NavigationPolicy, RunSummary},
};

/// +1 when the target lies north of the agent, -1 when south, 0 on the same row
pub fn target_vertical_sign(agent: &impl AgentPort) -> i8 {
    vertical_sign(agent.position().y, agent.target().y)
}

/// +1 when the target lies east of the agent, -1 when west, 0 in the same column
pub fn target_horizontal_sign(agent: &impl AgentPort) -> i8 {
    horizontal_sign(agent.position().x, agent.target().x)
}

// rows grow southwards, so a smaller target row is north
fn vertical_sign(agent_y: usize, target_y: usize) -> i8 {
    match agent_y.cmp(&target_y) {
        Ordering::Greater => 1,
        Ordering::Less => -1,
        Ordering::Equal => 0,
    }
}

fn horizontal_sign(agent_x: usize, target_x: usize) -> i8 {
    match target_x.cmp(&agent_x) {
        Ordering::Greater => 1,
        Ordering::Less => -1,
        Ordering::Equal => 0,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HomingConfig {
    /// when no open heading closes in on the target, pick any open heading
    /// instead of holding position
    pub fallback_to_any: bool,
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self {
            fallback_to_any: true,
        }
    }
}

/// greedy homing: moves along a random open heading that shortens the
/// manhattan distance to the target, or any open heading when none does
pub struct Homing<R: RandomSource = StdRandom> {
    state: PolicyState,
    config: HomingConfig,
    random: R,
}

impl Homing<StdRandom> {
    pub fn new() -> Self {
        Self {
            state: PolicyState::new(),
            config: HomingConfig::default(),
            random: StdRandom::from_entropy(),
        }
    }
}

impl Default for Homing<StdRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Homing<R> {
    pub fn with_random(config: HomingConfig, random: R) -> Self {
        Self {
            state: PolicyState::new(),
            config,
            random,
        }
    }

    pub fn config(&self) -> &HomingConfig {
        &self.config
    }

    /// next heading to take, or `None` when every heading is walled off
    pub fn determine_heading<A: AgentPort>(&mut self, agent: &A) -> Option<Heading> {
        determine_heading(&mut self.random, &self.config, agent)
    }
}

/// open headings that bring the agent closer to the target
pub fn goal_headings<A: AgentPort>(agent: &A) -> Vec<Heading> {
    let (position, target) = (agent.position(), agent.target());
    let vertical = vertical_sign(position.y, target.y);
    let horizontal = horizontal_sign(position.x, target.x);

    [
        (Heading::North, vertical > 0),
        (Heading::South, vertical < 0),
        (Heading::East, horizontal > 0),
        (Heading::West, horizontal < 0),
    ]
    .into_iter()
    .filter(|&(heading, wanted)| wanted && !agent.sense_heading(heading).is_wall())
    .map(|(heading, _)| heading)
    .collect()
}

pub fn open_headings<A: AgentPort>(agent: &A) -> Vec<Heading> {
    [Heading::North, Heading::South, Heading::East, Heading::West]
        .into_iter()
        .filter(|&heading| !agent.sense_heading(heading).is_wall())
        .collect()
}

fn determine_heading<R: RandomSource, A: AgentPort>(
    random: &mut R,
    config: &HomingConfig,
    agent: &A,
) -> Option<Heading> {
    let mut candidates = goal_headings(agent);

    if candidates.is_empty() && config.fallback_to_any {
        candidates = open_headings(agent);
        log::trace!(
            "no heading closes in from {}, falling back to {:?}",
            agent.position(),
            candidates
        );
    }

    random.pick(&candidates)
}

fn step<R: RandomSource, A: AgentPort>(
    random: &mut R,
    config: &HomingConfig,
    agent: &mut A,
) -> Result<RelativeDirection> {
    let heading = determine_heading(random, config, agent).ok_or(PolicyError::DeadEnd {
        position: agent.position(),
    })?;

    let direction = rotation_offset(agent.heading(), heading);
    agent.turn(direction);
    agent.advance()?;
    Ok(direction)
}

impl<R: RandomSource> NavigationPolicy for Homing<R> {
    fn start<A: AgentPort>(&mut self, agent: &mut A) -> Result<RunSummary> {
        let Self {
            state,
            config,
            random,
        } = self;
        state.run("homing", agent, |agent| step(random, config, agent))
    }

    fn describe(&self) -> &'static str {
        "homing: heads greedily for the target, breaking ties at random"
    }

    fn state(&self) -> &PolicyState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PolicyState {
        &mut self.state
    }
}
