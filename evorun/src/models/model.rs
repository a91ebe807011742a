#[cfg(test)]
#[path = "../../tests/unit/models/model_test.rs"]
mod model_test;

use crate::models::*;
use crate::selection::{RandomSelector, SelectorPool};
use crate::utils::{DefaultRandom, GenericResult, Random};
use std::sync::{Arc, PoisonError, RwLock};

/// A full configuration of an experiment: numeric parameters plus operators.
///
/// The model can be changed at any time, e.g. from a life-cycle listener or between runs. The engine takes
/// a [`ModelSnapshot`] at the start of every generation, so a change is applied at the next generation
/// boundary, not immediately.
pub struct Model<P: Program> {
    parameters: RwLock<Parameters>,
    operators: RwLock<Operators<P>>,
}

/// An immutable view on the model taken once per generation.
pub struct ModelSnapshot<P: Program> {
    /// Numeric parameters.
    pub parameters: Parameters,
    /// Operators.
    pub operators: Operators<P>,
}

impl<P: Program> Model<P> {
    /// Creates a new instance of `Model` validating the given configuration.
    pub fn new(parameters: Parameters, operators: Operators<P>) -> GenericResult<Self> {
        validate(&parameters, &operators)?;
        operators.fitness_caching.set(parameters.cache_fitness);

        Ok(Self { parameters: RwLock::new(parameters), operators: RwLock::new(operators) })
    }

    /// Returns a copy of the current parameters.
    pub fn parameters(&self) -> Parameters {
        self.parameters.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns a copy of the current operators.
    pub fn operators(&self) -> Operators<P> {
        self.operators.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Takes a snapshot of the current configuration and applies its fitness caching flag.
    pub fn snapshot(&self) -> ModelSnapshot<P> {
        let snapshot = ModelSnapshot { parameters: self.parameters(), operators: self.operators() };
        snapshot.operators.fitness_caching.set(snapshot.parameters.cache_fitness);

        snapshot
    }

    /// Checks that the model is runnable.
    pub fn validate(&self) -> GenericResult<()> {
        validate(&self.parameters(), &self.operators())
    }

    /// Changes parameters. Invalid changes are rejected and the current parameters are kept.
    pub fn update_parameters<F: FnOnce(&mut Parameters)>(&self, update_fn: F) -> GenericResult<()> {
        let mut parameters = self.parameters();
        update_fn(&mut parameters);
        validate(&parameters, &self.operators())?;

        *self.parameters.write().unwrap_or_else(PoisonError::into_inner) = parameters;

        Ok(())
    }

    /// Changes operators. Invalid changes are rejected and the current operators are kept.
    pub fn update_operators<F: FnOnce(&mut Operators<P>)>(&self, update_fn: F) -> GenericResult<()> {
        let mut operators = self.operators();
        update_fn(&mut operators);
        validate(&self.parameters(), &operators)?;

        *self.operators.write().unwrap_or_else(PoisonError::into_inner) = operators;

        Ok(())
    }
}

impl<P: Program> ModelSnapshot<P> {
    /// Returns crossover operator or an error if it is not configured.
    pub fn crossover(&self) -> GenericResult<&dyn Crossover<P>> {
        self.operators.crossover.as_deref().ok_or_else(|| "crossover operator is not configured".into())
    }

    /// Returns mutation operator or an error if it is not configured.
    pub fn mutation(&self) -> GenericResult<&dyn Mutation<P>> {
        self.operators.mutation.as_deref().ok_or_else(|| "mutation operator is not configured".into())
    }

    /// Returns the random source.
    pub fn random(&self) -> &dyn Random {
        self.operators.random.as_ref()
    }
}

fn validate<P: Program>(parameters: &Parameters, operators: &Operators<P>) -> GenericResult<()> {
    parameters.validate()?;

    if parameters.crossover_probability > 0. && operators.crossover.is_none() {
        return Err("crossover probability is positive, but no crossover operator is configured".into());
    }

    if parameters.mutation_probability > 0. && operators.mutation.is_none() {
        return Err("mutation probability is positive, but no mutation operator is configured".into());
    }

    Ok(())
}

/// Provides configurable way to build a model using fluent interface style.
pub struct ModelBuilder<P: Program> {
    parameters: Parameters,
    initialiser: Option<Arc<dyn Initialiser<P>>>,
    crossover: Option<Arc<dyn Crossover<P>>>,
    mutation: Option<Arc<dyn Mutation<P>>>,
    program_selector: Option<Arc<dyn ProgramSelector<P>>>,
    pool_selector: Option<Arc<dyn PoolSelector<P>>>,
    random: Option<Arc<dyn Random>>,
    fitness_caching: Option<FitnessCaching>,
}

impl<P: Program + 'static> Default for ModelBuilder<P> {
    fn default() -> Self {
        Self {
            parameters: Parameters::default(),
            initialiser: None,
            crossover: None,
            mutation: None,
            program_selector: None,
            pool_selector: None,
            random: None,
            fitness_caching: None,
        }
    }
}

impl<P: Program + 'static> ModelBuilder<P> {
    /// Sets numeric parameters. Default is `Parameters::default()`.
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Sets initialiser. It is mandatory.
    pub fn with_initialiser(mut self, initialiser: Arc<dyn Initialiser<P>>) -> Self {
        self.initialiser = Some(initialiser);
        self
    }

    /// Sets crossover operator.
    pub fn with_crossover(mut self, crossover: Arc<dyn Crossover<P>>) -> Self {
        self.crossover = Some(crossover);
        self
    }

    /// Sets mutation operator.
    pub fn with_mutation(mut self, mutation: Arc<dyn Mutation<P>>) -> Self {
        self.mutation = Some(mutation);
        self
    }

    /// Sets program selector. Default is random selection.
    pub fn with_program_selector(mut self, program_selector: Arc<dyn ProgramSelector<P>>) -> Self {
        self.program_selector = Some(program_selector);
        self
    }

    /// Sets pool selector. Default is a pool filled by random selection.
    pub fn with_pool_selector(mut self, pool_selector: Arc<dyn PoolSelector<P>>) -> Self {
        self.pool_selector = Some(pool_selector);
        self
    }

    /// Sets random source. Default is `DefaultRandom`.
    pub fn with_random(mut self, random: Arc<dyn Random>) -> Self {
        self.random = Some(random);
        self
    }

    /// Sets a fitness caching switch which programs of the representation share. Default is a new switch.
    pub fn with_fitness_caching(mut self, fitness_caching: FitnessCaching) -> Self {
        self.fitness_caching = Some(fitness_caching);
        self
    }

    /// Builds the model.
    pub fn build(self) -> GenericResult<Model<P>> {
        let initialiser = self.initialiser.ok_or_else(|| "missing initialiser".to_string())?;

        let operators = Operators {
            initialiser,
            crossover: self.crossover,
            mutation: self.mutation,
            program_selector: self.program_selector.unwrap_or_else(|| Arc::new(RandomSelector)),
            pool_selector: self.pool_selector.unwrap_or_else(|| Arc::new(SelectorPool::new(RandomSelector))),
            random: self.random.unwrap_or_else(|| Arc::new(DefaultRandom::default())),
            fitness_caching: self.fitness_caching.unwrap_or_default(),
        };

        Model::new(self.parameters, operators)
    }
}
