#[cfg(test)]
#[path = "../../tests/unit/managers/initialisation_test.rs"]
mod initialisation_test;

use super::*;
use crate::events::{Event, unexpected_event};
use crate::stats::{StatsField, StatsScope, StatsValue};

/// Creates the population of generation zero using the model's initialiser.
pub struct InitialisationManager {
    reversions: isize,
}

impl Default for InitialisationManager {
    fn default() -> Self {
        Self { reversions: NOT_ATTEMPTED }
    }
}

impl InitialisationManager {
    /// Returns an initial population accepted by listeners.
    pub fn initialise<P: Program>(
        &mut self,
        context: &ExecutionContext<P>,
        config: &ModelSnapshot<P>,
    ) -> GenericResult<Vec<P>> {
        context.stats.clear(StatsScope::Initialisation);

        let size = config.parameters.population_size;
        let initialiser = config.operators.initialiser.as_ref();

        let population = retry_until_accepted(
            &mut self.reversions,
            config.parameters.max_reversions,
            EventKind::Initialisation,
            || {
                let population = initialiser.initial_population(size, config.random());

                match context.broker.publish(Event::Initialisation { population })? {
                    Some(Event::Initialisation { population }) => Ok(Some(population)),
                    Some(other) => Err(unexpected_event(EventKind::Initialisation, &other)),
                    None => Ok(None),
                }
            },
        )?;

        context.stats.record(StatsField::InitReversions, StatsValue::Reversions(self.reversions));

        if population.len() != size {
            return Err(format!("initial population has {} programs, expected: {size}", population.len()).into());
        }

        Ok(population)
    }

    /// Returns amount of reversions of the last call or -1 if it was never called.
    pub fn reversions(&self) -> isize {
        self.reversions
    }
}
