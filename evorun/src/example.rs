//! This module contains an example representation to demonstrate practical usage of the crate: a variable
//! length bit string which should consist of ones only and have the target length ("OneMax").

#[cfg(test)]
#[path = "../tests/unit/example_test.rs"]
mod example_test;

use crate::models::*;
use crate::selection::{SelectorPool, TournamentSelector};
use crate::utils::{Float, GenericResult, Random};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// An example program: a bit string.
#[derive(Clone)]
pub struct BitProgram {
    bits: Vec<bool>,
    fitness_fn: FitnessFn<BitProgram>,
    caching: FitnessCaching,
    fitness: FitnessCell,
}

impl BitProgram {
    /// Creates a new instance of `BitProgram`.
    pub fn new(bits: Vec<bool>, fitness_fn: FitnessFn<BitProgram>, caching: FitnessCaching) -> Self {
        Self { bits, fitness_fn, caching, fitness: FitnessCell::default() }
    }

    /// Returns bits of the program.
    pub fn bits(&self) -> &[bool] {
        self.bits.as_slice()
    }

    /// Creates a program with other bits keeping the same fitness function.
    pub fn with_bits(&self, bits: Vec<bool>) -> Self {
        Self::new(bits, self.fitness_fn.clone(), self.caching.clone())
    }
}

impl Program for BitProgram {
    fn fitness(&self) -> Float {
        self.fitness.get_or_evaluate(self.caching.is_enabled(), || (self.fitness_fn)(self))
    }

    fn depth(&self) -> usize {
        self.bits.len()
    }
}

impl Debug for BitProgram {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let bits = self.bits.iter().map(|&bit| if bit { '1' } else { '0' }).collect::<String>();

        f.debug_struct("BitProgram").field("bits", &bits).field("fitness", &self.fitness.cached()).finish()
    }
}

/// Returns a fitness function which counts zero bits and the distance to the target length.
pub fn create_one_max_fitness(target_length: usize) -> FitnessFn<BitProgram> {
    Arc::new(move |program: &BitProgram| {
        let zeros = program.bits.iter().filter(|&&bit| !bit).count();

        (zeros + program.bits.len().abs_diff(target_length)) as Float
    })
}

/// Creates random bit strings of the fixed length.
pub struct BitInitialiser {
    length: usize,
    fitness_fn: FitnessFn<BitProgram>,
    caching: FitnessCaching,
}

impl BitInitialiser {
    /// Creates a new instance of `BitInitialiser`. Created programs share the given caching switch.
    pub fn new(length: usize, fitness_fn: FitnessFn<BitProgram>, caching: FitnessCaching) -> Self {
        Self { length, fitness_fn, caching }
    }
}

impl Initialiser<BitProgram> for BitInitialiser {
    fn initial_population(&self, size: usize, random: &dyn Random) -> Vec<BitProgram> {
        (0..size)
            .map(|_| {
                let bits = (0..self.length).map(|_| random.is_head_not_tails()).collect();
                BitProgram::new(bits, self.fitness_fn.clone(), self.caching.clone())
            })
            .collect()
    }
}

/// Cuts both parents at independent points and swaps their tails, so children lengths can differ from
/// parents lengths.
#[derive(Default)]
pub struct CutSpliceCrossover;

impl Crossover<BitProgram> for CutSpliceCrossover {
    fn crossover(&self, first: BitProgram, second: BitProgram, random: &dyn Random) -> Vec<BitProgram> {
        let first_cut = random.uniform_int(0, first.bits.len() as i32) as usize;
        let second_cut = random.uniform_int(0, second.bits.len() as i32) as usize;

        let (first_head, first_tail) = first.bits.split_at(first_cut);
        let (second_head, second_tail) = second.bits.split_at(second_cut);

        vec![
            first.with_bits(first_head.iter().chain(second_tail.iter()).copied().collect()),
            second.with_bits(second_head.iter().chain(first_tail.iter()).copied().collect()),
        ]
    }
}

/// Flips every bit with the given probability.
pub struct BitFlipMutation {
    probability: Float,
}

impl BitFlipMutation {
    /// Creates a new instance of `BitFlipMutation`.
    pub fn new(probability: Float) -> Self {
        Self { probability }
    }
}

impl Mutation<BitProgram> for BitFlipMutation {
    fn mutate(&self, mut program: BitProgram, random: &dyn Random) -> BitProgram {
        program.bits.iter_mut().filter(|_| random.is_hit(self.probability)).for_each(|bit| *bit = !*bit);
        program.fitness.invalidate();

        program
    }
}

/// Creates a model which evolves bit strings of the given length using tournament selection.
pub fn create_one_max_model(
    parameters: Parameters,
    random: Arc<dyn Random>,
    length: usize,
) -> GenericResult<Model<BitProgram>> {
    let fitness_fn = create_one_max_fitness(length);
    let caching = FitnessCaching::new(parameters.cache_fitness);

    ModelBuilder::default()
        .with_parameters(parameters)
        .with_random(random)
        .with_fitness_caching(caching.clone())
        .with_initialiser(Arc::new(BitInitialiser::new(length, fitness_fn, caching)))
        .with_crossover(Arc::new(CutSpliceCrossover))
        .with_mutation(Arc::new(BitFlipMutation::new(1. / length.max(1) as Float)))
        .with_program_selector(Arc::new(TournamentSelector::new(3)))
        .with_pool_selector(Arc::new(SelectorPool::new(TournamentSelector::new(2))))
        .build()
}
