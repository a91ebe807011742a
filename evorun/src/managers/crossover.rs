#[cfg(test)]
#[path = "../../tests/unit/managers/crossover_test.rs"]
mod crossover_test;

use super::*;
use crate::events::{Event, unexpected_event};
use crate::stats::{StatsField, StatsScope, StatsValue};
use crate::utils::Timer;

/// Applies crossover to two parents selected from the breeding pool.
pub struct CrossoverManager {
    reversions: isize,
}

impl Default for CrossoverManager {
    fn default() -> Self {
        Self { reversions: NOT_ATTEMPTED }
    }
}

impl CrossoverManager {
    /// Returns children accepted by listeners. A rejection repeats parent selection too. After acceptance,
    /// every child which exceeds the depth limit is replaced by its parent's clone, that is not a reversion.
    pub fn crossover<P: Program>(&mut self, breeding: &BreedingContext<P>) -> GenericResult<Vec<P>> {
        let BreedingContext { context, config, .. } = breeding;
        let timer = Timer::start();

        context.stats.clear(StatsScope::Crossover);

        let crossover = config.crossover()?;

        let (parents, children) = retry_until_accepted(
            &mut self.reversions,
            config.parameters.max_reversions,
            EventKind::Crossover,
            || {
                let parents = vec![breeding.select()?, breeding.select()?];
                let children = crossover.crossover(parents[0].clone(), parents[1].clone(), config.random());

                match context.broker.publish(Event::Crossover { parents, children })? {
                    Some(Event::Crossover { parents, children }) => Ok(Some((parents, children))),
                    Some(other) => Err(unexpected_event(EventKind::Crossover, &other)),
                    None => Ok(None),
                }
            },
        )?;

        if children.is_empty() {
            return Err("crossover has produced no children".into());
        }

        let children = apply_depth_limit(children, parents.as_slice(), config.parameters.max_depth);

        context.stats.record(StatsField::XoReversions, StatsValue::Reversions(self.reversions));
        context.stats.record(StatsField::XoParents, StatsValue::Programs(parents));
        context.stats.record(StatsField::XoChildren, StatsValue::Programs(children.clone()));
        context.stats.record(StatsField::XoTime, StatsValue::Elapsed(timer.elapsed()));

        Ok(children)
    }

    /// Returns amount of reversions of the last call or -1 if it was never called.
    pub fn reversions(&self) -> isize {
        self.reversions
    }
}
