use super::*;
use crate::helpers::models::*;
use crate::managers::NOT_ATTEMPTED;

#[test]
fn can_keep_latest_value() {
    let stats = StatsManager::<TestProgram>::default();

    stats.record(StatsField::GenNumber, StatsValue::Count(1));
    stats.record(StatsField::GenNumber, StatsValue::Count(2));

    assert_eq!(stats.get(StatsField::GenNumber).and_then(|value| value.as_count()), Some(2));
    assert_eq!(stats.size(), 1);
}

#[test]
fn can_clear_only_given_scope() {
    let stats = StatsManager::<TestProgram>::default();
    stats.record(StatsField::RunNumber, StatsValue::Count(0));
    stats.record(StatsField::XoReversions, StatsValue::Reversions(3));
    stats.record(StatsField::XoParents, StatsValue::Programs(create_population(&[1., 2.])));
    stats.record(StatsField::MutReversions, StatsValue::Reversions(0));

    stats.clear(StatsScope::Crossover);

    assert!(stats.get(StatsField::XoReversions).is_none());
    assert!(stats.get(StatsField::XoParents).is_none());
    assert_eq!(stats.get(StatsField::RunNumber).and_then(|value| value.as_count()), Some(0));
    assert_eq!(stats.get(StatsField::MutReversions).and_then(|value| value.as_reversions()), Some(0));
    assert_eq!(stats.size(), 2);
}

parameterized_test! {can_return_field_scope, (field, expected), {
    assert_eq!(field.scope(), expected);
}}

can_return_field_scope! {
    case01: (StatsField::RunFittestProgram, StatsScope::Run),
    case02: (StatsField::GenElites, StatsScope::Generation),
    case03: (StatsField::InitReversions, StatsScope::Initialisation),
    case04: (StatsField::PoolReversions, StatsScope::PoolSelection),
    case05: (StatsField::XoTime, StatsScope::Crossover),
    case06: (StatsField::MutChild, StatsScope::Mutation),
    case07: (StatsField::RepParent, StatsScope::Reproduction),
}

#[test]
fn can_access_typed_values() {
    let single = StatsValue::Program(TestProgram::new(7, 1.));
    let many = StatsValue::Programs(create_population(&[3., 4.]));
    let fitness = StatsValue::<TestProgram>::Fitness(0.5);

    assert_eq!(single.as_programs().map(get_ids), Some(vec![7]));
    assert_eq!(many.as_programs().map(get_ids), Some(vec![0, 1]));
    assert_eq!(fitness.as_fitness(), Some(0.5));
    assert!(fitness.as_programs().is_none());
    assert!(fitness.as_count().is_none());
    assert_eq!(StatsValue::<TestProgram>::Reversions(NOT_ATTEMPTED).as_reversions(), Some(-1));
}

#[test]
fn can_ignore_values_with_no_stats() {
    let stats: &dyn StatsSink<TestProgram> = &NoStats;

    stats.record(StatsField::GenNumber, StatsValue::Count(1));
    stats.clear(StatsScope::Generation);
}
