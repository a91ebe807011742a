#[cfg(test)]
#[path = "../../tests/unit/models/parameters_test.rs"]
mod parameters_test;

use crate::utils::{Float, GenericError, GenericResult};
use serde::Deserialize;
use std::io::Read;

/// Numeric parameters of an experiment: a set of runs.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Parameters {
    /// Amount of programs in every generation. Default is 100.
    pub population_size: usize,
    /// Max amount of generations in one run. Default is 50.
    pub no_generations: usize,
    /// Amount of runs. Default is 1.
    pub no_runs: usize,
    /// Breeding pool size. Default is None which means the whole previous population.
    pub pool_size: Option<usize>,
    /// Amount of best programs copied unmodified into the next generation. Default is 0.
    pub no_elites: usize,
    /// Probability to apply crossover. Default is 0.9.
    pub crossover_probability: Float,
    /// Probability to apply mutation. Default is 0.1.
    pub mutation_probability: Float,
    /// A run stops as soon as the best fitness is less or equal to this value. Default is 0.
    pub termination_fitness: Float,
    /// Max structural depth of a child produced by crossover or mutation. Default is None (no limit).
    pub max_depth: Option<usize>,
    /// Max amount of reversions per operator invocation. Default is None (retry forever).
    pub max_reversions: Option<usize>,
    /// Whether programs should cache evaluated fitness. Default is true.
    pub cache_fitness: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            population_size: 100,
            no_generations: 50,
            no_runs: 1,
            pool_size: None,
            no_elites: 0,
            crossover_probability: 0.9,
            mutation_probability: 0.1,
            termination_fitness: 0.,
            max_depth: None,
            max_reversions: None,
            cache_fitness: true,
        }
    }
}

impl Parameters {
    /// Returns reproduction probability which is always derived from crossover and mutation probabilities.
    pub fn reproduction_probability(&self) -> Float {
        1. - self.crossover_probability - self.mutation_probability
    }

    /// Returns the breeding pool size: the configured one or the given population size.
    pub fn pool_size_or(&self, population_size: usize) -> usize {
        self.pool_size.unwrap_or(population_size)
    }

    /// Checks that parameters describe a runnable experiment.
    pub fn validate(&self) -> GenericResult<()> {
        let errors = [
            (self.population_size == 0).then(|| "population size should be positive".into()),
            check_probability("crossover", self.crossover_probability),
            check_probability("mutation", self.mutation_probability),
            (self.crossover_probability + self.mutation_probability > 1.).then(|| {
                format!(
                    "sum of crossover ({}) and mutation ({}) probabilities should not exceed 1",
                    self.crossover_probability, self.mutation_probability
                )
                .into()
            }),
            (self.pool_size == Some(0)).then(|| "pool size should be positive when specified".into()),
            (self.max_depth == Some(0)).then(|| "max depth should be positive when specified".into()),
            self.termination_fitness.is_nan().then(|| "termination fitness should be a number".into()),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<GenericError>>();

        if errors.is_empty() { Ok(()) } else { Err(GenericError::combine(errors, ", ")) }
    }
}

fn check_probability(name: &str, probability: Float) -> Option<GenericError> {
    (!(0. ..=1.).contains(&probability))
        .then(|| format!("{name} probability should be in [0, 1] range, got: {probability}").into())
}

/// Reads parameters from json.
pub fn read_parameters<R: Read>(reader: R) -> GenericResult<Parameters> {
    let parameters: Parameters = serde_json::from_reader(reader)?;

    Ok(parameters)
}
