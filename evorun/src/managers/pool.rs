#[cfg(test)]
#[path = "../../tests/unit/managers/pool_test.rs"]
mod pool_test;

use super::*;
use crate::events::{Event, unexpected_event};
use crate::stats::{StatsField, StatsScope, StatsValue};

/// Builds a breeding pool which parents are selected from for the rest of the generation.
pub struct PoolManager {
    reversions: isize,
}

impl Default for PoolManager {
    fn default() -> Self {
        Self { reversions: NOT_ATTEMPTED }
    }
}

impl PoolManager {
    /// Returns a breeding pool accepted by listeners.
    pub fn pool<P: Program>(
        &mut self,
        context: &ExecutionContext<P>,
        config: &ModelSnapshot<P>,
        population: &[P],
    ) -> GenericResult<Vec<P>> {
        context.stats.clear(StatsScope::PoolSelection);

        let size = config.parameters.pool_size_or(population.len());
        let pool_selector = config.operators.pool_selector.as_ref();

        let pool = retry_until_accepted(
            &mut self.reversions,
            config.parameters.max_reversions,
            EventKind::PoolSelection,
            || {
                let pool = pool_selector.pool(population, size, config.random());

                match context.broker.publish(Event::PoolSelection { pool })? {
                    Some(Event::PoolSelection { pool }) => Ok(Some(pool)),
                    Some(other) => Err(unexpected_event(EventKind::PoolSelection, &other)),
                    None => Ok(None),
                }
            },
        )?;

        context.stats.record(StatsField::PoolReversions, StatsValue::Reversions(self.reversions));

        Ok(pool)
    }

    /// Returns amount of reversions of the last call or -1 if it was never called.
    pub fn reversions(&self) -> isize {
        self.reversions
    }
}
