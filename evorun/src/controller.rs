//! Contains the entry point which executes all runs of an experiment within an explicit execution context.

#[cfg(test)]
#[path = "../tests/unit/controller_test.rs"]
mod controller_test;

use crate::events::EventBroker;
use crate::managers::{BestTracker, RunManager, RunRecord};
use crate::models::{Model, Program};
use crate::stats::{StatsManager, StatsSink};
use crate::utils::{Float, GenericResult, InfoLogger};
use std::sync::Arc;

/// Specifies a telemetry mode.
#[derive(Clone)]
pub enum TelemetryMode {
    /// No telemetry at all.
    None,
    /// Only logging.
    OnlyLogging {
        /// A logger type.
        logger: InfoLogger,
        /// Specifies how often the generation's best fitness is logged.
        log_best: usize,
    },
}

/// Keeps the services shared by all managers: an event broker, a metrics sink and telemetry.
pub struct ExecutionContext<P: Program> {
    /// A life-cycle event broker.
    pub broker: EventBroker<P>,
    /// A metrics sink.
    pub stats: Arc<dyn StatsSink<P>>,
    /// A telemetry mode.
    pub telemetry: TelemetryMode,
}

impl<P: Program + 'static> ExecutionContext<P> {
    /// Creates a new instance of `ExecutionContext` with an in-memory metrics sink.
    pub fn new(telemetry: TelemetryMode) -> Self {
        Self { broker: EventBroker::default(), stats: Arc::new(StatsManager::default()), telemetry }
    }

    /// Replaces the metrics sink.
    pub fn with_stats(mut self, stats: Arc<dyn StatsSink<P>>) -> Self {
        self.stats = stats;
        self
    }
}

impl<P: Program> ExecutionContext<P> {
    /// Writes log message.
    pub fn log(&self, message: &str) {
        if let TelemetryMode::OnlyLogging { logger, .. } = &self.telemetry {
            (logger)(message)
        }
    }

    /// Returns true if the given generation should be logged.
    pub fn should_log_generation(&self, generation: usize) -> bool {
        match &self.telemetry {
            TelemetryMode::OnlyLogging { log_best, .. } => generation % (*log_best).max(1) == 0,
            TelemetryMode::None => false,
        }
    }
}

/// Executes the configured amount of runs for a model.
pub struct Controller<P: Program> {
    context: ExecutionContext<P>,
    run_manager: RunManager,
    best: BestTracker<P>,
}

impl<P: Program + 'static> Controller<P> {
    /// Creates a new instance of `Controller` with a default execution context.
    pub fn new(telemetry: TelemetryMode) -> Self {
        Self::with_context(ExecutionContext::new(telemetry))
    }
}

impl<P: Program> Controller<P> {
    /// Creates a new instance of `Controller` using the given execution context.
    pub fn with_context(context: ExecutionContext<P>) -> Self {
        Self { context, run_manager: RunManager::default(), best: BestTracker::default() }
    }

    /// Returns the execution context.
    pub fn context(&self) -> &ExecutionContext<P> {
        &self.context
    }

    /// Returns the execution context as mutable, e.g. to subscribe listeners.
    pub fn context_mut(&mut self) -> &mut ExecutionContext<P> {
        &mut self.context
    }

    /// Returns the run manager.
    pub fn run_manager(&self) -> &RunManager {
        &self.run_manager
    }

    /// Returns the best program found across all executed runs.
    pub fn best(&self) -> Option<(&P, Float)> {
        self.best.program().map(|program| (program, self.best.fitness()))
    }

    /// Validates the model and executes its runs one by one with the same model instance. An error
    /// (invalid model, failed listener, exhausted reversions) aborts all remaining runs.
    pub fn run(&mut self, model: &Model<P>) -> GenericResult<Vec<RunRecord<P>>> {
        model.validate()?;

        let parameters = model.parameters();
        self.context.log(&format!(
            "configured to use runs: {}, generations: {}, population size: {}, elites: {}, pool size: {}",
            parameters.no_runs,
            parameters.no_generations,
            parameters.population_size,
            parameters.no_elites,
            parameters.pool_size.map_or_else(|| "population".to_string(), |size| size.to_string()),
        ));
        self.context.log(&format!(
            "configured to use probabilities: crossover {:.3}, mutation {:.3}, reproduction {:.3}",
            parameters.crossover_probability,
            parameters.mutation_probability,
            parameters.reproduction_probability(),
        ));

        (0..parameters.no_runs).try_fold(Vec::with_capacity(parameters.no_runs), |mut records, run| {
            let record = self.run_manager.run(&self.context, model, run)?;

            if let Some(program) = record.best_program.as_ref() {
                self.best.offer(program, record.best_fitness);
            }

            records.push(record);

            Ok(records)
        })
    }
}
