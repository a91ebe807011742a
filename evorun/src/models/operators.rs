use crate::models::{FitnessCaching, Program};
use crate::utils::Random;
use std::sync::Arc;

/// Creates an initial population of programs.
pub trait Initialiser<P: Program>: Send + Sync {
    /// Creates `size` programs from scratch.
    fn initial_population(&self, size: usize, random: &dyn Random) -> Vec<P>;
}

/// A crossover operator which recombines two parents.
pub trait Crossover<P: Program>: Send + Sync {
    /// Produces one or more children from two parents. Parents are already cloned by the caller.
    fn crossover(&self, first: P, second: P, random: &dyn Random) -> Vec<P>;
}

/// A mutation operator which modifies one program.
pub trait Mutation<P: Program>: Send + Sync {
    /// Produces a mutated program. The parent is already cloned by the caller.
    fn mutate(&self, program: P, random: &dyn Random) -> P;
}

/// Selects programs from a breeding pool. The pool is always passed explicitly.
pub trait ProgramSelector<P: Program>: Send + Sync {
    /// Selects a program from the pool. Returns `None` only when the pool is empty.
    fn select<'a>(&self, pool: &'a [P], random: &dyn Random) -> Option<&'a P>;
}

/// Builds a breeding pool from the population.
pub trait PoolSelector<P: Program>: Send + Sync {
    /// Returns a pool of the given size built from the population.
    fn pool(&self, population: &[P], size: usize, random: &dyn Random) -> Vec<P>;
}

/// Keeps the operators used by the engine. Operators are shared, so cloning is cheap.
pub struct Operators<P: Program> {
    /// Creates the population of generation zero.
    pub initialiser: Arc<dyn Initialiser<P>>,
    /// A crossover operator, required when crossover probability is positive.
    pub crossover: Option<Arc<dyn Crossover<P>>>,
    /// A mutation operator, required when mutation probability is positive.
    pub mutation: Option<Arc<dyn Mutation<P>>>,
    /// Selects parents from the breeding pool.
    pub program_selector: Arc<dyn ProgramSelector<P>>,
    /// Builds the breeding pool.
    pub pool_selector: Arc<dyn PoolSelector<P>>,
    /// A random source used by the engine and passed to operators.
    pub random: Arc<dyn Random>,
    /// A fitness caching switch shared with the representation's programs.
    pub fitness_caching: FitnessCaching,
}

impl<P: Program> Clone for Operators<P> {
    fn clone(&self) -> Self {
        Self {
            initialiser: self.initialiser.clone(),
            crossover: self.crossover.clone(),
            mutation: self.mutation.clone(),
            program_selector: self.program_selector.clone(),
            pool_selector: self.pool_selector.clone(),
            random: self.random.clone(),
            fitness_caching: self.fitness_caching.clone(),
        }
    }
}
