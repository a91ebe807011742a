#[cfg(test)]
#[path = "../../tests/unit/models/program_test.rs"]
mod program_test;

use crate::utils::{Float, compare_floats};
use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::{Arc, OnceLock};

/// Represents a candidate program: one individual of the evolving population.
///
/// The engine never looks inside a program: it clones programs, orders them by fitness (lower is better),
/// checks their validity and measures their structural depth.
pub trait Program: Clone + Send + Sync {
    /// Returns fitness of the program. Lower values are better.
    fn fitness(&self) -> Float;

    /// Returns structural depth of the program which is compared with the depth limit.
    fn depth(&self) -> usize;

    /// Returns true if program is valid.
    fn is_valid(&self) -> bool {
        true
    }
}

/// A fitness function which evaluates a program. Lower values are better.
pub type FitnessFn<P> = Arc<dyn Fn(&P) -> Float + Send + Sync>;

/// Compares two programs by their fitness: a better program (lower fitness) is greater than a worse one,
/// so that sorting in ascending order puts the worst program first. NaN fitness is the worst possible.
pub fn compare_programs<P: Program>(a: &P, b: &P) -> Ordering {
    compare_floats(b.fitness(), a.fitness())
}

/// A shared switch which tells programs whether their evaluated fitness can be reused. The engine sets it
/// from the model's `cache_fitness` parameter every time a configuration snapshot is taken, so a change of the
/// parameter is applied at the next generation boundary.
#[derive(Clone, Debug)]
pub struct FitnessCaching {
    is_enabled: Arc<AtomicBool>,
}

impl Default for FitnessCaching {
    fn default() -> Self {
        Self::new(true)
    }
}

impl FitnessCaching {
    /// Creates a new instance of `FitnessCaching`.
    pub fn new(is_enabled: bool) -> Self {
        Self { is_enabled: Arc::new(AtomicBool::new(is_enabled)) }
    }

    /// Returns true if evaluated fitness can be reused.
    pub fn is_enabled(&self) -> bool {
        self.is_enabled.load(AtomicOrdering::Relaxed)
    }

    /// Changes the switch for every program sharing it.
    pub fn set(&self, is_enabled: bool) {
        self.is_enabled.store(is_enabled, AtomicOrdering::Relaxed);
    }
}

/// Keeps evaluated fitness of a program, so it can be evaluated only once when fitness caching is enabled.
#[derive(Clone, Debug, Default)]
pub struct FitnessCell {
    value: OnceLock<Float>,
}

impl FitnessCell {
    /// Returns cached fitness or evaluates it. When caching is disabled, fitness is evaluated each time and
    /// a previously cached value is ignored.
    pub fn get_or_evaluate<F: FnOnce() -> Float>(&self, is_cached: bool, evaluate: F) -> Float {
        if is_cached { *self.value.get_or_init(evaluate) } else { evaluate() }
    }

    /// Returns cached value, if any.
    pub fn cached(&self) -> Option<Float> {
        self.value.get().copied()
    }

    /// Drops cached value, should be called when program's content is changed.
    pub fn invalidate(&mut self) {
        self.value = OnceLock::new();
    }
}
