//! This module reimports commonly used types.

pub use crate::controller::{Controller, ExecutionContext, TelemetryMode};

pub use crate::events::{Decision, Event, EventBroker, EventKind};

pub use crate::managers::{RunManager, RunRecord, RunState, TerminationReason};

pub use crate::models::{
    Crossover, FitnessCaching, FitnessCell, FitnessFn, Initialiser, Model, ModelBuilder, ModelSnapshot, Mutation,
    Operators, Parameters, PoolSelector, Program, ProgramSelector, compare_programs, read_parameters,
};

pub use crate::selection::{LinearRankSelector, RandomSelector, SelectorPool, TournamentSelector};

pub use crate::stats::{StatsField, StatsManager, StatsScope, StatsSink, StatsValue};

pub use crate::utils::{DefaultRandom, Float, GenericError, GenericResult, InfoLogger, Random, Timer};
