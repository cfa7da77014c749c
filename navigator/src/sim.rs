use std::time::Duration;

use crate::{
    direction::{CellState, Heading, RelativeDirection, rotation_offset},
    maze::{Maze, ParsedMaze, Position},
    policies::{CancelHandle, MoveTally},
    port::{AgentPort, PortError},
};

/// in-process agent moving through a `Maze`
///
/// besides implementing the port it keeps its own move log: every relocation
/// is tallied by the turn between the headings of consecutive moves, so tests
/// can check a policy's bookkeeping against what actually happened.
pub struct SimulatedAgent {
    maze: Maze,
    position: Position,
    heading: Heading,
    target: Position,
    last_move_heading: Heading,
    steps: usize,
    holds: usize,
    relocations: MoveTally,
    move_limit: Option<(usize, CancelHandle)>,
    paused: Duration,
}

impl SimulatedAgent {
    pub fn new(maze: Maze, start: Position, target: Position) -> Self {
        Self {
            maze,
            position: start,
            heading: Heading::North,
            target,
            last_move_heading: Heading::North,
            steps: 0,
            holds: 0,
            relocations: MoveTally::default(),
            move_limit: None,
            paused: Duration::ZERO,
        }
    }

    pub fn from_parsed(parsed: ParsedMaze) -> eyre::Result<Self> {
        let start = parsed
            .start
            .ok_or_else(|| eyre::eyre!("start not found in maze"))?;
        let target = parsed
            .target
            .ok_or_else(|| eyre::eyre!("target not found in maze"))?;
        Ok(Self::new(parsed.maze, start, target))
    }

    pub fn with_heading(mut self, heading: Heading) -> Self {
        self.set_heading(heading);
        self
    }

    pub fn with_target(mut self, target: Position) -> Self {
        self.target = target;
        self
    }

    /// resets `handle` once `limit` run iterations have happened, counting
    /// both relocations and iterations spent holding at a dead end
    pub fn with_move_limit(mut self, limit: usize, handle: CancelHandle) -> Self {
        self.move_limit = Some((limit, handle));
        self
    }

    pub fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
        self.last_move_heading = heading;
    }

    pub fn set_target(&mut self, target: Position) {
        self.target = target;
    }

    /// teleports without counting a move
    pub fn place(&mut self, position: Position) {
        self.position = position;
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn holds(&self) -> usize {
        self.holds
    }

    pub fn relocations(&self) -> MoveTally {
        self.relocations
    }

    pub fn paused(&self) -> Duration {
        self.paused
    }

    fn check_move_limit(&self) {
        if let Some((limit, handle)) = &self.move_limit
            && self.steps + self.holds >= *limit
            && handle.is_active()
        {
            log::debug!("move limit of {} reached, cancelling", limit);
            handle.reset();
        }
    }
}

impl AgentPort for SimulatedAgent {
    fn sense(&self, direction: RelativeDirection) -> CellState {
        self.maze.look(self.position, self.heading.turned(direction))
    }

    fn turn(&mut self, direction: RelativeDirection) {
        self.heading = self.heading.turned(direction);
    }

    fn advance(&mut self) -> Result<(), PortError> {
        let next = self
            .position
            .step(self.heading)
            .filter(|&next| self.maze.contains(next))
            .ok_or(PortError::OutOfBounds {
                position: self.position,
            })?;

        if !self.maze.is_walkable(next) {
            return Err(PortError::BlockedAdvance {
                position: self.position,
                heading: self.heading,
            });
        }

        self.relocations
            .record(rotation_offset(self.last_move_heading, self.heading));
        self.last_move_heading = self.heading;
        self.position = next;
        self.steps += 1;
        self.check_move_limit();

        Ok(())
    }

    fn heading(&self) -> Heading {
        self.heading
    }

    fn position(&self) -> Position {
        self.position
    }

    fn target(&self) -> Position {
        self.target
    }

    fn pause(&mut self, delay: Duration) {
        self.paused += delay;
        std::thread::sleep(delay);
    }

    fn hold(&mut self, delay: Duration) {
        self.holds += 1;
        self.check_move_limit();

        if delay.is_zero() {
            std::thread::yield_now();
        } else {
            self.pause(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Cell;

    fn corridor() -> SimulatedAgent {
        let parsed = Maze::from_text("#####\n#r.t#\n#####\n").unwrap();
        SimulatedAgent::from_parsed(parsed).unwrap()
    }

    #[test]
    fn senses_relative_to_heading() {
        let mut agent = corridor();
        assert_eq!(agent.sense(RelativeDirection::Ahead), CellState::Wall);
        assert_eq!(agent.sense(RelativeDirection::Right), CellState::Passage);

        agent.turn(RelativeDirection::Right);
        assert_eq!(agent.heading(), Heading::East);
        assert_eq!(agent.sense(RelativeDirection::Ahead), CellState::Passage);
        assert_eq!(agent.sense(RelativeDirection::Behind), CellState::Wall);
    }

    #[test]
    fn advancing_into_a_wall_is_a_port_error() {
        let mut agent = corridor();
        assert_eq!(
            agent.advance(),
            Err(PortError::BlockedAdvance {
                position: Position::new(1, 1),
                heading: Heading::North,
            })
        );
        assert_eq!(agent.steps(), 0);
    }

    #[test]
    fn leaving_the_grid_is_a_port_error() {
        let maze = Maze::filled(2, 2, Cell::Passage);
        let mut agent = SimulatedAgent::new(maze, Position::new(0, 0), Position::new(1, 1));
        assert!(matches!(agent.advance(), Err(PortError::OutOfBounds { .. })));
    }

    #[test]
    fn relocations_are_logged_by_turn() {
        let maze = Maze::filled(4, 4, Cell::Passage);
        let mut agent = SimulatedAgent::new(maze, Position::new(1, 2), Position::new(0, 0));

        agent.advance().unwrap();
        agent.turn(RelativeDirection::Right);
        agent.advance().unwrap();
        agent.turn(RelativeDirection::Behind);
        agent.advance().unwrap();

        let tally = agent.relocations();
        assert_eq!((tally.ahead, tally.right, tally.behind, tally.left), (1, 1, 1, 0));
        assert_eq!(agent.position(), Position::new(1, 1));
    }

    #[test]
    fn move_limit_cancels_a_running_policy() {
        use crate::policies::{Homing, HomingConfig, NavigationPolicy, Outcome};
        use crate::random::StdRandom;

        let maze = Maze::filled(1, 5, Cell::Passage);
        let mut policy = Homing::with_random(HomingConfig::default(), StdRandom::seeded(0));
        let mut agent = SimulatedAgent::new(maze, Position::new(0, 4), Position::new(0, 0))
            .with_move_limit(2, policy.cancel_handle());

        let summary = policy.start(&mut agent).unwrap();

        assert_eq!(summary.outcome, Outcome::Cancelled);
        assert_eq!(agent.steps(), 2);
        assert_eq!(agent.position(), Position::new(0, 2));
        assert!(!policy.is_active());
    }

    #[test]
    fn held_iterations_count_towards_the_move_limit() {
        use crate::policies::{Homing, HomingConfig, NavigationPolicy, Outcome};
        use crate::random::StdRandom;

        // target due north behind a wall, so a strict homing run is stuck at once
        let mut maze = Maze::filled(3, 3, Cell::Wall);
        maze.set(Position::new(1, 2), Cell::Passage);
        maze.set(Position::new(1, 0), Cell::Passage);
        let strict = HomingConfig {
            fallback_to_any: false,
        };
        let mut policy = Homing::with_random(strict, StdRandom::seeded(0));
        policy.set_delay(1).unwrap();
        let mut agent = SimulatedAgent::new(maze, Position::new(1, 2), Position::new(1, 0))
            .with_move_limit(5, policy.cancel_handle());
        assert_eq!(agent.maze().get(Position::new(1, 1)), Some(Cell::Wall));

        let summary = policy.start(&mut agent).unwrap();

        assert_eq!(summary.outcome, Outcome::Cancelled);
        assert_eq!(summary.steps, 0);
        assert_eq!(summary.dead_ends, 5);
        assert_eq!(agent.holds(), 5);
        assert_eq!(agent.paused(), Duration::from_millis(5));
    }
}
