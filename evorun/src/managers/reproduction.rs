#[cfg(test)]
#[path = "../../tests/unit/managers/reproduction_test.rs"]
mod reproduction_test;

use super::*;
use crate::events::{Event, unexpected_event};
use crate::stats::{StatsField, StatsScope, StatsValue};
use crate::utils::Timer;

/// Copies a parent selected from the breeding pool into the next generation as it is.
pub struct ReproductionManager {
    reversions: isize,
}

impl Default for ReproductionManager {
    fn default() -> Self {
        Self { reversions: NOT_ATTEMPTED }
    }
}

impl ReproductionManager {
    /// Returns a parent accepted (and possibly replaced) by listeners. No operator is applied.
    pub fn reproduce<P: Program>(&mut self, breeding: &BreedingContext<P>) -> GenericResult<P> {
        let BreedingContext { context, config, .. } = breeding;
        let timer = Timer::start();

        context.stats.clear(StatsScope::Reproduction);

        let parent = retry_until_accepted(
            &mut self.reversions,
            config.parameters.max_reversions,
            EventKind::Reproduction,
            || match context.broker.publish(Event::Reproduction { parent: breeding.select()? })? {
                Some(Event::Reproduction { parent }) => Ok(Some(parent)),
                Some(other) => Err(unexpected_event(EventKind::Reproduction, &other)),
                None => Ok(None),
            },
        )?;

        context.stats.record(StatsField::RepReversions, StatsValue::Reversions(self.reversions));
        context.stats.record(StatsField::RepParent, StatsValue::Program(parent.clone()));
        context.stats.record(StatsField::RepTime, StatsValue::Elapsed(timer.elapsed()));

        Ok(parent)
    }

    /// Returns amount of reversions of the last call or -1 if it was never called.
    pub fn reversions(&self) -> isize {
        self.reversions
    }
}
