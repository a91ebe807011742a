#[cfg(test)]
#[path = "../../tests/unit/managers/generation_test.rs"]
mod generation_test;

use super::*;
use crate::events::Event;
use crate::models::Model;
use crate::stats::{StatsField, StatsScope, StatsValue};

/// Keeps amount of reversions accumulated within one generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationReversions {
    /// Breeding pool reversions.
    pub pool: usize,
    /// Crossover reversions.
    pub crossover: usize,
    /// Mutation reversions.
    pub mutation: usize,
    /// Reproduction reversions.
    pub reproduction: usize,
}

impl GenerationReversions {
    /// Returns total amount of reversions.
    pub fn total(&self) -> usize {
        self.pool + self.crossover + self.mutation + self.reproduction
    }
}

/// Produces a full generational replacement: elites, breeding pool and probabilistic operator dispatch.
#[derive(Default)]
pub struct GenerationManager {
    elitism: ElitismManager,
    pool: PoolManager,
    crossover: CrossoverManager,
    mutation: MutationManager,
    reproduction: ReproductionManager,
    reversions: GenerationReversions,
}

impl GenerationManager {
    /// Creates the next population from the previous one.
    ///
    /// The model is read once, right after the generation start event, so listeners of that event can
    /// reconfigure the generation being built. Elites are put first, then the breeding pool is selected and
    /// operators are applied until the population reaches its target size. Crossover children which do
    /// not fit are dropped.
    pub fn generation<P: Program>(
        &mut self,
        context: &ExecutionContext<P>,
        model: &Model<P>,
        generation: usize,
        previous: &[P],
    ) -> GenericResult<Vec<P>> {
        context.stats.clear(StatsScope::Generation);
        context.broker.notify(Event::GenerationStart { generation })?;

        let config = model.snapshot();
        let size = config.parameters.population_size;
        let crossover_probability = config.parameters.crossover_probability;
        let mutation_probability = config.parameters.mutation_probability;

        self.reversions = GenerationReversions::default();

        let mut population = Vec::with_capacity(size);

        let mut elites = self.elitism.elites(context, &config, previous)?;
        elites.truncate(size);
        context.stats.record(StatsField::GenElites, StatsValue::Programs(elites.clone()));
        population.extend(elites);

        let pool = self.pool.pool(context, &config, previous)?;
        self.reversions.pool = accepted_after(self.pool.reversions());

        let breeding = BreedingContext { context, config: &config, pool: pool.as_slice() };

        while population.len() < size {
            let probability = config.random().uniform_real(0., 1.);

            if probability < crossover_probability {
                let children = self.crossover.crossover(&breeding)?;
                self.reversions.crossover += accepted_after(self.crossover.reversions());

                let capacity = size - population.len();
                population.extend(children.into_iter().take(capacity));
            } else if probability < crossover_probability + mutation_probability {
                population.push(self.mutation.mutate(&breeding)?);
                self.reversions.mutation += accepted_after(self.mutation.reversions());
            } else {
                population.push(self.reproduction.reproduce(&breeding)?);
                self.reversions.reproduction += accepted_after(self.reproduction.reversions());
            }
        }

        context.stats.record(StatsField::GenNumber, StatsValue::Count(generation));
        context.stats.record(StatsField::GenPopulation, StatsValue::Programs(population.clone()));
        context.broker.notify(Event::GenerationEnd { generation })?;

        Ok(population)
    }

    /// Returns reversions accumulated within the last generation.
    pub fn reversions(&self) -> GenerationReversions {
        self.reversions
    }

    /// Returns crossover manager.
    pub fn crossover(&self) -> &CrossoverManager {
        &self.crossover
    }

    /// Returns mutation manager.
    pub fn mutation(&self) -> &MutationManager {
        &self.mutation
    }

    /// Returns reproduction manager.
    pub fn reproduction(&self) -> &ReproductionManager {
        &self.reproduction
    }

    /// Returns pool manager.
    pub fn pool(&self) -> &PoolManager {
        &self.pool
    }
}

fn accepted_after(reversions: isize) -> usize {
    reversions.max(0) as usize
}
