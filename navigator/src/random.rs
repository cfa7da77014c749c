use rand::{Rng, SeedableRng, rngs::StdRng};

/// source of uniform draws for the policies' random choices
pub trait RandomSource: Send {
    /// uniform draw in `0..bound`, `bound` is never zero
    fn below(&mut self, bound: usize) -> usize;

    fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            None
        } else {
            Some(items[self.below(items.len())])
        }
    }
}

pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandom {
    fn below(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// replays a fixed sequence of draws, cycling when exhausted
///
/// each draw is reduced modulo the requested bound so a script stays valid
/// whatever the size of the set being chosen from.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    draws: Vec<usize>,
    next: usize,
}

impl ScriptedRandom {
    pub fn new(draws: &[usize]) -> Self {
        Self {
            draws: draws.to_vec(),
            next: 0,
        }
    }

    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&mut self, bound: usize) -> usize {
        if self.draws.is_empty() {
            return 0;
        }
        let draw = self.draws[self.next % self.draws.len()];
        self.next += 1;
        draw % bound
    }
}
