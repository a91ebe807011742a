//! Contains life-cycle events and a broker which dispatches them to listeners.
//!
//! Listeners can accept an event, override its payload or reject it. A rejection (reversion) makes the
//! publishing manager repeat the whole stochastic step: selection plus operator application.

mod broker;
pub use self::broker::*;

use crate::models::Program;
use crate::utils::Float;
use std::fmt::{Display, Formatter};

/// Specifies a kind of life-cycle event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A run is started.
    RunStart,
    /// A run is finished.
    RunEnd,
    /// A new generation is started.
    GenerationStart,
    /// A generation is fully materialized.
    GenerationEnd,
    /// An initial population is proposed.
    Initialisation,
    /// Elites are selected.
    Elitism,
    /// A breeding pool is proposed.
    PoolSelection,
    /// Children are produced by crossover.
    Crossover,
    /// A child is produced by mutation.
    Mutation,
    /// A parent is chosen for reproduction.
    Reproduction,
}

impl EventKind {
    /// Returns true if listeners can reject the event, forcing the operation to be retried.
    pub fn is_rejectable(&self) -> bool {
        matches!(
            self,
            Self::Initialisation | Self::PoolSelection | Self::Crossover | Self::Mutation | Self::Reproduction
        )
    }

    /// Returns true if listeners can replace the event's payload.
    pub fn is_overridable(&self) -> bool {
        self.is_rejectable() || matches!(self, Self::Elitism)
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::RunStart => "run-start",
            Self::RunEnd => "run-end",
            Self::GenerationStart => "generation-start",
            Self::GenerationEnd => "generation-end",
            Self::Initialisation => "initialisation",
            Self::Elitism => "elitism",
            Self::PoolSelection => "pool-selection",
            Self::Crossover => "crossover",
            Self::Mutation => "mutation",
            Self::Reproduction => "reproduction",
        };

        write!(f, "{name}")
    }
}

/// A life-cycle event with its payload.
#[derive(Clone, Debug)]
pub enum Event<P: Program> {
    /// A run is started.
    RunStart {
        /// Run number, starting from zero.
        run: usize,
    },
    /// A run is finished.
    RunEnd {
        /// Run number, starting from zero.
        run: usize,
        /// Best fitness found within the run.
        best_fitness: Float,
        /// Amount of generations executed.
        generations: usize,
    },
    /// A new generation is started, configuration is refreshed right after this event.
    GenerationStart {
        /// Generation number, starting from one.
        generation: usize,
    },
    /// A generation is fully materialized.
    GenerationEnd {
        /// Generation number, starting from one.
        generation: usize,
    },
    /// An initial population is proposed.
    Initialisation {
        /// A proposed population.
        population: Vec<P>,
    },
    /// Elites are selected.
    Elitism {
        /// Selected elites, best first.
        elites: Vec<P>,
    },
    /// A breeding pool is proposed.
    PoolSelection {
        /// A proposed pool.
        pool: Vec<P>,
    },
    /// Children are produced by crossover.
    Crossover {
        /// Clones of selected parents.
        parents: Vec<P>,
        /// Produced children.
        children: Vec<P>,
    },
    /// A child is produced by mutation.
    Mutation {
        /// A clone of selected parent.
        parent: P,
        /// A mutated child.
        child: P,
    },
    /// A parent is chosen for reproduction.
    Reproduction {
        /// A selected parent.
        parent: P,
    },
}

impl<P: Program> Event<P> {
    /// Returns kind of the event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::RunStart { .. } => EventKind::RunStart,
            Self::RunEnd { .. } => EventKind::RunEnd,
            Self::GenerationStart { .. } => EventKind::GenerationStart,
            Self::GenerationEnd { .. } => EventKind::GenerationEnd,
            Self::Initialisation { .. } => EventKind::Initialisation,
            Self::Elitism { .. } => EventKind::Elitism,
            Self::PoolSelection { .. } => EventKind::PoolSelection,
            Self::Crossover { .. } => EventKind::Crossover,
            Self::Mutation { .. } => EventKind::Mutation,
            Self::Reproduction { .. } => EventKind::Reproduction,
        }
    }
}

/// A listener's response on an event.
#[derive(Clone, Debug)]
pub enum Decision<P: Program> {
    /// Keeps the event as it is: the listener has no opinion.
    Accept,
    /// Replaces the event's payload. The event kind must stay the same.
    Override(Event<P>),
    /// Rejects the event, so the operation has to be repeated.
    Reject,
}
