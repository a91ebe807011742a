#[cfg(test)]
#[path = "../../tests/unit/managers/mutation_test.rs"]
mod mutation_test;

use super::*;
use crate::events::{Event, unexpected_event};
use crate::stats::{StatsField, StatsScope, StatsValue};
use crate::utils::Timer;

/// Applies mutation to a parent selected from the breeding pool.
pub struct MutationManager {
    reversions: isize,
}

impl Default for MutationManager {
    fn default() -> Self {
        Self { reversions: NOT_ATTEMPTED }
    }
}

impl MutationManager {
    /// Returns a child accepted by listeners or the parent's clone when the child exceeds the depth limit.
    pub fn mutate<P: Program>(&mut self, breeding: &BreedingContext<P>) -> GenericResult<P> {
        let BreedingContext { context, config, .. } = breeding;
        let timer = Timer::start();

        context.stats.clear(StatsScope::Mutation);

        let mutation = config.mutation()?;

        let (parent, child) =
            retry_until_accepted(&mut self.reversions, config.parameters.max_reversions, EventKind::Mutation, || {
                let parent = breeding.select()?;
                let child = mutation.mutate(parent.clone(), config.random());

                match context.broker.publish(Event::Mutation { parent, child })? {
                    Some(Event::Mutation { parent, child }) => Ok(Some((parent, child))),
                    Some(other) => Err(unexpected_event(EventKind::Mutation, &other)),
                    None => Ok(None),
                }
            })?;

        let child = match config.parameters.max_depth {
            Some(max_depth) if child.depth() > max_depth => parent.clone(),
            _ => child,
        };

        context.stats.record(StatsField::MutReversions, StatsValue::Reversions(self.reversions));
        context.stats.record(StatsField::MutParent, StatsValue::Program(parent));
        context.stats.record(StatsField::MutChild, StatsValue::Program(child.clone()));
        context.stats.record(StatsField::MutTime, StatsValue::Elapsed(timer.elapsed()));

        Ok(child)
    }

    /// Returns amount of reversions of the last call or -1 if it was never called.
    pub fn reversions(&self) -> isize {
        self.reversions
    }
}
