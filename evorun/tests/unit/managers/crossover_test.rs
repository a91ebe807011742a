use super::*;
use crate::events::Decision;
use crate::helpers::models::*;
use crate::models::{Model, Parameters};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

fn crossover(
    context: &ExecutionContext<TestProgram>,
    model: &Model<TestProgram>,
    pool: &[TestProgram],
) -> GenericResult<Vec<TestProgram>> {
    let config = model.snapshot();
    let breeding = BreedingContext { context, config: &config, pool };

    CrossoverManager::default().crossover(&breeding)
}

#[test]
fn can_produce_children_from_two_parents() {
    let (context, stats) = create_test_context();
    let model = create_test_model(Parameters::default());
    let config = model.snapshot();
    let pool = create_population(&[3., 2., 1.]);
    let breeding = BreedingContext { context: &context, config: &config, pool: pool.as_slice() };
    let mut manager = CrossoverManager::default();
    assert_eq!(manager.reversions(), NOT_ATTEMPTED);

    let children = manager.crossover(&breeding).expect("cannot apply crossover");

    assert_eq!(get_ids(children.as_slice()), vec![0, 1]);
    assert_eq!(manager.reversions(), 0);
    assert_eq!(stats.get(StatsField::XoReversions).and_then(|value| value.as_reversions()), Some(0));
    assert_eq!(stats.get(StatsField::XoParents).and_then(|value| value.as_programs().map(get_ids)), Some(vec![0, 1]));
    assert_eq!(stats.get(StatsField::XoChildren).and_then(|value| value.as_programs().map(get_ids)), Some(vec![0, 1]));
    assert!(stats.get(StatsField::XoTime).is_some());
}

#[test]
fn can_select_new_parents_after_reject() {
    let calls = Rc::new(RefCell::new(0));
    let (mut context, stats) = create_test_context();
    context.broker.subscribe(EventKind::Crossover, {
        let calls = calls.clone();
        move |_| {
            *calls.borrow_mut() += 1;
            Ok(if *calls.borrow() == 1 { Decision::Reject } else { Decision::Accept })
        }
    });
    let model = create_test_model(Parameters::default());
    let pool = create_population(&[3., 2., 1.]);

    let children = crossover(&context, &model, pool.as_slice()).expect("cannot apply crossover");

    assert_eq!(get_ids(children.as_slice()), vec![2, 0]);
    assert_eq!(stats.get(StatsField::XoReversions).and_then(|value| value.as_reversions()), Some(1));
}

#[test]
fn can_replace_too_deep_children_with_parents() {
    let (context, _) = create_test_context();
    let model = create_test_model_builder(Parameters { max_depth: Some(5), ..Parameters::default() })
        .with_crossover(Arc::new(FnCrossover(|first: TestProgram, second: TestProgram| {
            vec![
                TestProgram::new(100, 0.).with_depth(6),
                TestProgram::new(101, 0.).with_depth(5),
                TestProgram::new(102, 0.).with_depth(7),
                TestProgram::new(first.id + second.id + 103, 0.).with_depth(1),
            ]
        })))
        .build()
        .expect("cannot build model");
    let pool = create_population(&[3., 2., 1.]);

    let children = crossover(&context, &model, pool.as_slice()).expect("cannot apply crossover");

    assert_eq!(get_ids(children.as_slice()), vec![0, 101, 0, 104]);
}

#[test]
fn can_apply_overridden_children_before_depth_limit() {
    let (mut context, _) = create_test_context();
    context.broker.subscribe(EventKind::Crossover, |event| match event {
        Event::Crossover { parents, .. } => Ok(Decision::Override(Event::Crossover {
            parents: parents.clone(),
            children: vec![TestProgram::new(50, 0.).with_depth(3), TestProgram::new(51, 0.).with_depth(30)],
        })),
        _ => Ok(Decision::Accept),
    });
    let model = create_test_model(Parameters { max_depth: Some(10), ..Parameters::default() });
    let pool = create_population(&[3., 2., 1.]);

    let children = crossover(&context, &model, pool.as_slice()).expect("cannot apply crossover");

    assert_eq!(get_ids(children.as_slice()), vec![50, 1]);
}

#[test]
fn can_fail_on_no_children() {
    let (context, _) = create_test_context();
    let model = create_test_model_builder(Parameters::default())
        .with_crossover(Arc::new(FnCrossover(|_: TestProgram, _: TestProgram| -> Vec<TestProgram> { vec![] })))
        .build()
        .expect("cannot build model");
    let pool = create_population(&[1., 2.]);

    let result = crossover(&context, &model, pool.as_slice());

    assert_eq!(result.err().map(|err| err.to_string()), Some("crossover has produced no children".to_string()));
}

#[test]
fn can_fail_on_empty_pool() {
    let (context, _) = create_test_context();
    let model = create_test_model(Parameters::default());

    let result = crossover(&context, &model, &[]);

    assert!(result.is_err());
}

#[test]
fn can_fail_without_crossover_operator() {
    let (context, _) = create_test_context();
    let model =
        create_test_model(Parameters { crossover_probability: 0., mutation_probability: 0.5, ..Default::default() });
    model.update_operators(|operators| operators.crossover = None).expect("cannot update operators");
    let pool = create_population(&[1., 2.]);

    let result = crossover(&context, &model, pool.as_slice());

    assert_eq!(result.err().map(|err| err.to_string()), Some("crossover operator is not configured".to_string()));
}
