//! Contains built-in program and pool selection operators.

#[cfg(test)]
#[path = "../tests/unit/selection_test.rs"]
mod selection_test;

use crate::models::{PoolSelector, Program, ProgramSelector, compare_programs};
use crate::utils::Random;

/// Selects a program uniformly at random.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomSelector;

impl<P: Program> ProgramSelector<P> for RandomSelector {
    fn select<'a>(&self, pool: &'a [P], random: &dyn Random) -> Option<&'a P> {
        if pool.is_empty() {
            return None;
        }

        pool.get(random.uniform_int(0, pool.len() as i32 - 1) as usize)
    }
}

/// Runs a tournament between randomly chosen programs and selects the best one.
#[derive(Clone, Copy, Debug)]
pub struct TournamentSelector {
    size: usize,
}

impl TournamentSelector {
    /// Creates a new instance of `TournamentSelector`. Tournament size is at least one.
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }
}

impl<P: Program> ProgramSelector<P> for TournamentSelector {
    fn select<'a>(&self, pool: &'a [P], random: &dyn Random) -> Option<&'a P> {
        (0..self.size)
            .filter_map(|_| RandomSelector.select(pool, random))
            // NOTE the earliest contestant wins a tie
            .reduce(|best, next| if compare_programs(next, best).is_gt() { next } else { best })
    }
}

/// Selects a program with probability proportional to its rank: the best program has the biggest chance.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearRankSelector;

impl<P: Program> ProgramSelector<P> for LinearRankSelector {
    fn select<'a>(&self, pool: &'a [P], random: &dyn Random) -> Option<&'a P> {
        if pool.is_empty() {
            return None;
        }

        // ascending order puts the worst program first, so its weight is the smallest
        let mut ranked = pool.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| compare_programs(*a, *b));

        let weights = (1..=ranked.len()).collect::<Vec<_>>();

        ranked.get(random.weighted(weights.as_slice())).copied()
    }
}

/// Builds a breeding pool by applying a program selector repeatedly.
#[derive(Clone, Copy, Debug)]
pub struct SelectorPool<S> {
    selector: S,
}

impl<S> SelectorPool<S> {
    /// Creates a new instance of `SelectorPool`.
    pub fn new(selector: S) -> Self {
        Self { selector }
    }
}

impl<P, S> PoolSelector<P> for SelectorPool<S>
where
    P: Program,
    S: ProgramSelector<P>,
{
    fn pool(&self, population: &[P], size: usize, random: &dyn Random) -> Vec<P> {
        (0..size).filter_map(|_| self.selector.select(population, random)).cloned().collect()
    }
}
