#[cfg(test)]
#[path = "../../tests/unit/managers/run_test.rs"]
mod run_test;

use super::*;
use crate::events::Event;
use crate::models::Model;
use crate::stats::{StatsField, StatsScope, StatsValue};
use crate::utils::{Float, Timer, compare_floats};
use std::time::{Duration, SystemTime};

/// Specifies why a run is terminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminationReason {
    /// The best fitness has reached the termination fitness.
    FitnessReached,
    /// All configured generations are executed.
    Exhausted,
}

/// A state of a run. States are never revisited and `Terminated` is final.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    /// The run is not started yet.
    #[default]
    NotStarted,
    /// An initial population is being created.
    Initialising,
    /// The given generation is being created.
    Generating(usize),
    /// The run is finished.
    Terminated(TerminationReason),
}

/// Keeps the result of one run.
#[derive(Clone, Debug)]
pub struct RunRecord<P: Program> {
    /// Run number, starting from zero.
    pub run: usize,
    /// The best program found, if any valid program was seen.
    pub best_program: Option<P>,
    /// Fitness of the best program or infinity.
    pub best_fitness: Float,
    /// Amount of executed generations, excluding generation zero.
    pub generations: usize,
    /// Wall-clock time when the run was started.
    pub started_at: SystemTime,
    /// Run duration.
    pub elapsed: Duration,
    /// Why the run was terminated.
    pub termination: TerminationReason,
}

/// Tracks the best program seen. It is replaced only by a strictly better valid program, so the tracked
/// fitness never increases.
#[derive(Clone, Debug)]
pub struct BestTracker<P: Program> {
    program: Option<P>,
    fitness: Float,
}

impl<P: Program> Default for BestTracker<P> {
    fn default() -> Self {
        Self { program: None, fitness: Float::INFINITY }
    }
}

impl<P: Program> BestTracker<P> {
    /// Evaluates every program of the population and returns true if the best one is improved.
    pub fn update(&mut self, population: &[P]) -> bool {
        population.iter().fold(false, |is_improved, program| {
            let fitness = program.fitness();
            self.offer(program, fitness) || is_improved
        })
    }

    /// Offers an already evaluated program and returns true if it becomes the best one.
    pub fn offer(&mut self, program: &P, fitness: Float) -> bool {
        if program.is_valid() && compare_floats(fitness, self.fitness).is_lt() {
            self.program = Some(program.clone());
            self.fitness = fitness;
            true
        } else {
            false
        }
    }

    /// Returns the best program, if any.
    pub fn program(&self) -> Option<&P> {
        self.program.as_ref()
    }

    /// Returns the best fitness or infinity.
    pub fn fitness(&self) -> Float {
        self.fitness
    }
}

/// Drives the generation loop of one run.
#[derive(Default)]
pub struct RunManager {
    initialisation: InitialisationManager,
    generation: GenerationManager,
    state: RunState,
}

impl RunManager {
    /// Executes one run: creates an initial population and creates new generations until either the
    /// configured amount of generations is reached or the best fitness reaches the termination fitness.
    /// The model is read again before every generation.
    pub fn run<P: Program>(
        &mut self,
        context: &ExecutionContext<P>,
        model: &Model<P>,
        run: usize,
    ) -> GenericResult<RunRecord<P>> {
        self.state = RunState::NotStarted;

        context.stats.clear(StatsScope::Run);
        context.broker.notify(Event::RunStart { run })?;
        context.stats.record(StatsField::RunNumber, StatsValue::Count(run));

        let timer = Timer::start();
        let started_at = SystemTime::now();
        let mut tracker = BestTracker::default();

        self.state = RunState::Initialising;
        let mut population = self.initialisation.initialise(context, &model.snapshot())?;
        tracker.update(population.as_slice());
        record_best(context, &tracker);

        context.log(&format!(
            "[run {run}] created initial population in {}ms, reversions: {}, best fitness: {:.3}",
            timer.elapsed_millis(),
            self.initialisation.reversions(),
            tracker.fitness()
        ));

        let mut generations = 0;
        let termination = loop {
            if generations >= model.parameters().no_generations {
                break TerminationReason::Exhausted;
            }

            generations += 1;
            self.state = RunState::Generating(generations);

            let generation_time = Timer::start();
            population = self.generation.generation(context, model, generations, population.as_slice())?;
            tracker.update(population.as_slice());
            record_best(context, &tracker);

            if context.should_log_generation(generations) {
                let reversions = self.generation.reversions();
                let reversions =
                    if reversions.total() > 0 { format!(", reversions: {reversions:?}") } else { String::new() };

                context.log(&format!(
                    "[run {run}] generation {generations} took {}ms, best fitness: {:.3}{reversions}",
                    generation_time.elapsed_millis(),
                    tracker.fitness()
                ));
            }

            if tracker.fitness() <= model.parameters().termination_fitness {
                break TerminationReason::FitnessReached;
            }
        };

        self.state = RunState::Terminated(termination);

        let elapsed = timer.elapsed();
        context.stats.record(StatsField::RunTime, StatsValue::Elapsed(elapsed));
        context.stats.record(StatsField::RunGenerations, StatsValue::Count(generations));
        context.broker.notify(Event::RunEnd { run, best_fitness: tracker.fitness(), generations })?;

        context.log(&format!(
            "[run {run}] finished in {}ms ({termination:?}), total generations: {generations}, best fitness: {:.3}",
            elapsed.as_millis(),
            tracker.fitness()
        ));

        Ok(RunRecord {
            run,
            best_fitness: tracker.fitness(),
            best_program: tracker.program,
            generations,
            started_at,
            elapsed,
            termination,
        })
    }

    /// Returns the state of the current or last run.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Returns initialisation manager.
    pub fn initialisation(&self) -> &InitialisationManager {
        &self.initialisation
    }

    /// Returns generation manager.
    pub fn generation(&self) -> &GenerationManager {
        &self.generation
    }
}

fn record_best<P: Program>(context: &ExecutionContext<P>, tracker: &BestTracker<P>) {
    context.stats.record(StatsField::RunFitnessMin, StatsValue::Fitness(tracker.fitness()));

    if let Some(program) = tracker.program() {
        context.stats.record(StatsField::RunFittestProgram, StatsValue::Program(program.clone()));
    }
}
