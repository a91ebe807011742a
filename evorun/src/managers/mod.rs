//! Contains managers which orchestrate one run: initialisation, generational replacement and the
//! per-operator accept/reject (reversion) protocol.

mod crossover;
pub use self::crossover::CrossoverManager;

mod elitism;
pub use self::elitism::ElitismManager;

mod generation;
pub use self::generation::{GenerationManager, GenerationReversions};

mod initialisation;
pub use self::initialisation::InitialisationManager;

mod mutation;
pub use self::mutation::MutationManager;

mod pool;
pub use self::pool::PoolManager;

mod reproduction;
pub use self::reproduction::ReproductionManager;

mod run;
pub use self::run::*;

use crate::controller::ExecutionContext;
use crate::events::EventKind;
use crate::models::{ModelSnapshot, Program};
use crate::utils::GenericResult;

/// A value of a reversion counter before the first attempt.
pub const NOT_ATTEMPTED: isize = -1;

/// Keeps everything an operator manager needs within one generation: the breeding pool is passed
/// explicitly instead of being kept by the program selector.
pub struct BreedingContext<'a, P: Program> {
    /// An execution context.
    pub context: &'a ExecutionContext<P>,
    /// A configuration snapshot of the current generation.
    pub config: &'a ModelSnapshot<P>,
    /// A breeding pool of the current generation.
    pub pool: &'a [P],
}

impl<P: Program> BreedingContext<'_, P> {
    /// Selects a program from the pool using the program selector and returns its clone.
    pub fn select(&self) -> GenericResult<P> {
        self.config
            .operators
            .program_selector
            .select(self.pool, self.config.random())
            .cloned()
            .ok_or_else(|| "cannot select a program from an empty breeding pool".into())
    }
}

/// Repeats an attempt until listeners accept its result. The counter is reset on each call and incremented
/// before every attempt, so its final value is the amount of rejected attempts.
fn retry_until_accepted<T, F>(
    reversions: &mut isize,
    max_reversions: Option<usize>,
    kind: EventKind,
    mut attempt: F,
) -> GenericResult<T>
where
    F: FnMut() -> GenericResult<Option<T>>,
{
    *reversions = NOT_ATTEMPTED;

    loop {
        *reversions += 1;

        if let Some(limit) = max_reversions.filter(|&limit| *reversions as usize > limit) {
            return Err(format!("{kind} is reverted more than max allowed {limit} times").into());
        }

        if let Some(accepted) = attempt()? {
            return Ok(accepted);
        }
    }
}

/// Replaces every child deeper than the limit with a clone of the corresponding parent.
fn apply_depth_limit<P: Program>(children: Vec<P>, parents: &[P], max_depth: Option<usize>) -> Vec<P> {
    let Some(max_depth) = max_depth else {
        return children;
    };

    if parents.is_empty() {
        return children;
    }

    children
        .into_iter()
        .enumerate()
        .map(|(idx, child)| if child.depth() > max_depth { parents[idx % parents.len()].clone() } else { child })
        .collect()
}
