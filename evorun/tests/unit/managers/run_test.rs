use super::*;
use crate::events::Decision;
use crate::helpers::models::*;
use crate::models::Parameters;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Returns a model where every program starts with the given fitness and only mutation is applied which
/// decreases fitness by the given step.
fn create_descending_model(parameters: Parameters, initial: Float, step: Float) -> Model<TestProgram> {
    create_test_model_builder(Parameters { crossover_probability: 0., mutation_probability: 1., ..parameters })
        .with_initialiser(Arc::new(FnInitialiser(move |size: usize| create_population(&vec![initial; size]))))
        .with_mutation(Arc::new(FnMutation(move |program: TestProgram| {
            TestProgram::new(program.id, program.fitness - step)
        })))
        .build()
        .expect("cannot build model")
}

#[test]
fn can_stop_when_termination_fitness_is_reached() {
    let (context, stats) = create_test_context();
    let model = create_descending_model(
        Parameters { population_size: 4, no_generations: 5, termination_fitness: 0., ..Parameters::default() },
        10.,
        5.,
    );
    let mut manager = RunManager::default();
    assert_eq!(manager.state(), RunState::NotStarted);

    let record = manager.run(&context, &model, 0).expect("cannot run");

    assert_eq!(record.run, 0);
    assert_eq!(record.generations, 2);
    assert_eq!(record.best_fitness, 0.);
    assert_eq!(record.termination, TerminationReason::FitnessReached);
    assert_eq!(record.best_program.map(|program| program.fitness), Some(0.));
    assert_eq!(manager.state(), RunState::Terminated(TerminationReason::FitnessReached));
    assert_eq!(stats.get(StatsField::RunGenerations).and_then(|value| value.as_count()), Some(2));
    assert_eq!(stats.get(StatsField::RunFitnessMin).and_then(|value| value.as_fitness()), Some(0.));
}

#[test]
fn can_execute_all_generations() {
    let (context, stats) = create_test_context();
    let model = create_test_model(Parameters {
        population_size: 5,
        no_generations: 3,
        termination_fitness: -1.,
        ..Parameters::default()
    });
    let mut manager = RunManager::default();

    let record = manager.run(&context, &model, 2).expect("cannot run");

    assert_eq!(record.run, 2);
    assert_eq!(record.generations, 3);
    assert_eq!(record.best_fitness, 0.);
    assert_eq!(record.termination, TerminationReason::Exhausted);
    assert_eq!(manager.state(), RunState::Terminated(TerminationReason::Exhausted));
    assert_eq!(manager.initialisation().reversions(), 0);
    assert_eq!(stats.get(StatsField::RunNumber).and_then(|value| value.as_count()), Some(2));
    assert_eq!(stats.get(StatsField::GenNumber).and_then(|value| value.as_count()), Some(3));
}

#[test]
fn can_terminate_without_generations() {
    let (context, _) = create_test_context();
    let model = create_test_model(Parameters { population_size: 3, no_generations: 0, ..Parameters::default() });

    let record = RunManager::default().run(&context, &model, 0).expect("cannot run");

    assert_eq!(record.generations, 0);
    assert_eq!(record.termination, TerminationReason::Exhausted);
    assert_eq!(record.best_fitness, 0.);
}

#[test]
fn can_publish_life_cycle_events_in_order() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let (mut context, _) = create_test_context();
    let kinds = [
        EventKind::RunStart,
        EventKind::Initialisation,
        EventKind::GenerationStart,
        EventKind::GenerationEnd,
        EventKind::RunEnd,
    ];
    kinds.into_iter().for_each(|kind| {
        let events = events.clone();
        context.broker.subscribe(kind, move |event| {
            events.borrow_mut().push(event.kind().to_string());
            Ok(Decision::Accept)
        });
    });
    let model = create_test_model(Parameters {
        population_size: 2,
        no_generations: 2,
        termination_fitness: -1.,
        ..Parameters::default()
    });

    RunManager::default().run(&context, &model, 0).expect("cannot run");

    assert_eq!(
        *events.borrow(),
        vec![
            "run-start",
            "initialisation",
            "generation-start",
            "generation-end",
            "generation-start",
            "generation-end",
            "run-end"
        ]
    );
}

#[test]
fn can_read_model_changes_between_generations() {
    let (mut context, _) = create_test_context();
    let model = Arc::new(create_test_model(Parameters {
        population_size: 2,
        no_generations: 10,
        termination_fitness: -1.,
        ..Parameters::default()
    }));
    context.broker.subscribe(EventKind::GenerationEnd, {
        let model = model.clone();
        move |event| match event {
            Event::GenerationEnd { generation: 3 } => {
                model.update_parameters(|parameters| parameters.no_generations = 3)?;
                Ok(Decision::Accept)
            }
            _ => Ok(Decision::Accept),
        }
    });

    let record = RunManager::default().run(&context, &model, 0).expect("cannot run");

    assert_eq!(record.generations, 3);
    assert_eq!(record.termination, TerminationReason::Exhausted);
}

#[test]
fn can_propagate_listener_error() {
    let (mut context, _) = create_test_context();
    context.broker.subscribe(EventKind::GenerationStart, |event| match event {
        Event::GenerationStart { generation: 2 } => Err("stop here".into()),
        _ => Ok(Decision::Accept),
    });
    let model = create_test_model(Parameters {
        population_size: 2,
        no_generations: 5,
        termination_fitness: -1.,
        ..Parameters::default()
    });
    let mut manager = RunManager::default();

    let result = manager.run(&context, &model, 0);

    assert_eq!(result.err().map(|err| err.to_string()), Some("stop here".to_string()));
    assert_eq!(manager.state(), RunState::Generating(2));
}

#[test]
fn can_ignore_invalid_programs_when_tracking_best() {
    let mut tracker = BestTracker::default();
    let population = vec![
        TestProgram::new(0, -5.).with_validity(false),
        TestProgram::new(1, 3.),
        TestProgram::new(2, 4.),
    ];

    let is_improved = tracker.update(population.as_slice());

    assert!(is_improved);
    assert_eq!(tracker.program().map(|program| program.id), Some(1));
    assert_eq!(tracker.fitness(), 3.);
}

#[test]
fn can_evaluate_every_program() {
    let mut tracker = BestTracker::default();
    let population = vec![TestProgram::new(0, 1.).with_validity(false), TestProgram::new(1, 2.)];

    tracker.update(population.as_slice());

    assert!(population.iter().all(|program| program.evaluations() == 1));
}

#[test]
fn can_keep_best_fitness_non_increasing() {
    let mut tracker = BestTracker::default();
    assert_eq!(tracker.fitness(), Float::INFINITY);
    assert!(tracker.program().is_none());

    let history = [vec![5., 7.], vec![6., 8.], vec![2., 9.], vec![2., 3.]]
        .iter()
        .map(|fitness| {
            let population = create_population(fitness.as_slice());
            (tracker.update(population.as_slice()), tracker.fitness())
        })
        .collect::<Vec<_>>();

    assert_eq!(history, vec![(true, 5.), (false, 5.), (true, 2.), (false, 2.)]);
}

#[test]
fn can_keep_first_of_equally_good_programs() {
    let mut tracker = BestTracker::default();

    tracker.update(create_population(&[1., 1., 1.]).as_slice());

    assert_eq!(tracker.program().map(|program| program.id), Some(0));
}
