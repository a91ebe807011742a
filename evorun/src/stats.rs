//! Specifies a write-only metrics sink for run, generation and operator observations and its in-memory
//! implementation.

#[cfg(test)]
#[path = "../tests/unit/stats_test.rs"]
mod stats_test;

use crate::models::Program;
use crate::utils::Float;
use rustc_hash::FxHashMap;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

/// Specifies a scope of observations: all fields of a scope are reset when the scope starts again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatsScope {
    /// A single run.
    Run,
    /// A single generation.
    Generation,
    /// An initialisation of generation zero.
    Initialisation,
    /// A breeding pool selection.
    PoolSelection,
    /// A single crossover invocation.
    Crossover,
    /// A single mutation invocation.
    Mutation,
    /// A single reproduction invocation.
    Reproduction,
}

/// Specifies an observed field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatsField {
    /// Run number.
    RunNumber,
    /// Elapsed run time.
    RunTime,
    /// Best fitness found in the run so far.
    RunFitnessMin,
    /// Best program found in the run so far.
    RunFittestProgram,
    /// Amount of generations executed in the run.
    RunGenerations,
    /// Generation number.
    GenNumber,
    /// Full population of the generation.
    GenPopulation,
    /// Elites carried into the generation.
    GenElites,
    /// Reversions of the initial population.
    InitReversions,
    /// Reversions of the breeding pool.
    PoolReversions,
    /// Crossover parents.
    XoParents,
    /// Crossover children.
    XoChildren,
    /// Crossover reversions.
    XoReversions,
    /// Elapsed crossover time.
    XoTime,
    /// Mutation parent.
    MutParent,
    /// Mutation child.
    MutChild,
    /// Mutation reversions.
    MutReversions,
    /// Elapsed mutation time.
    MutTime,
    /// Reproduced parent.
    RepParent,
    /// Reproduction reversions.
    RepReversions,
    /// Elapsed reproduction time.
    RepTime,
}

impl StatsField {
    /// Returns a scope of the field.
    pub fn scope(&self) -> StatsScope {
        match self {
            Self::RunNumber | Self::RunTime | Self::RunFitnessMin | Self::RunFittestProgram | Self::RunGenerations => {
                StatsScope::Run
            }
            Self::GenNumber | Self::GenPopulation | Self::GenElites => StatsScope::Generation,
            Self::InitReversions => StatsScope::Initialisation,
            Self::PoolReversions => StatsScope::PoolSelection,
            Self::XoParents | Self::XoChildren | Self::XoReversions | Self::XoTime => StatsScope::Crossover,
            Self::MutParent | Self::MutChild | Self::MutReversions | Self::MutTime => StatsScope::Mutation,
            Self::RepParent | Self::RepReversions | Self::RepTime => StatsScope::Reproduction,
        }
    }
}

/// An observed value.
#[derive(Clone, Debug)]
pub enum StatsValue<P: Program> {
    /// A counter or a sequence number.
    Count(usize),
    /// A reversion counter: -1 means never attempted.
    Reversions(isize),
    /// A fitness value.
    Fitness(Float),
    /// An elapsed time.
    Elapsed(Duration),
    /// A single program.
    Program(P),
    /// Many programs.
    Programs(Vec<P>),
}

impl<P: Program> StatsValue<P> {
    /// Returns a counter value, if the value is a counter.
    pub fn as_count(&self) -> Option<usize> {
        if let Self::Count(value) = self { Some(*value) } else { None }
    }

    /// Returns a reversions value, if the value is a reversion counter.
    pub fn as_reversions(&self) -> Option<isize> {
        if let Self::Reversions(value) = self { Some(*value) } else { None }
    }

    /// Returns a fitness value, if the value is a fitness.
    pub fn as_fitness(&self) -> Option<Float> {
        if let Self::Fitness(value) = self { Some(*value) } else { None }
    }

    /// Returns programs, if the value keeps one or many programs.
    pub fn as_programs(&self) -> Option<&[P]> {
        match self {
            Self::Program(program) => Some(std::slice::from_ref(program)),
            Self::Programs(programs) => Some(programs.as_slice()),
            _ => None,
        }
    }
}

/// A write-only sink of observations.
pub trait StatsSink<P: Program> {
    /// Records the latest value of a field.
    fn record(&self, field: StatsField, value: StatsValue<P>);

    /// Notifies the sink that the scope starts again.
    fn clear(&self, scope: StatsScope);
}

/// A sink which keeps the latest value of every field in memory.
pub struct StatsManager<P: Program> {
    values: RwLock<FxHashMap<StatsField, StatsValue<P>>>,
}

impl<P: Program> Default for StatsManager<P> {
    fn default() -> Self {
        Self { values: RwLock::new(FxHashMap::default()) }
    }
}

impl<P: Program> StatsManager<P> {
    /// Returns the latest value of a field.
    pub fn get(&self, field: StatsField) -> Option<StatsValue<P>> {
        self.values.read().unwrap_or_else(PoisonError::into_inner).get(&field).cloned()
    }

    /// Returns amount of recorded fields.
    pub fn size(&self) -> usize {
        self.values.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl<P: Program> StatsSink<P> for StatsManager<P> {
    fn record(&self, field: StatsField, value: StatsValue<P>) {
        self.values.write().unwrap_or_else(PoisonError::into_inner).insert(field, value);
    }

    fn clear(&self, scope: StatsScope) {
        self.values.write().unwrap_or_else(PoisonError::into_inner).retain(|field, _| field.scope() != scope);
    }
}

/// A sink which drops all observations.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoStats;

impl<P: Program> StatsSink<P> for NoStats {
    fn record(&self, _: StatsField, _: StatsValue<P>) {}

    fn clear(&self, _: StatsScope) {}
}
