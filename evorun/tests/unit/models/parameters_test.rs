use super::*;
use std::io::BufReader;

#[test]
fn can_read_full_parameters() {
    let json = r#"{
        "populationSize": 10,
        "noGenerations": 5,
        "noRuns": 3,
        "poolSize": 8,
        "noElites": 2,
        "crossoverProbability": 0.7,
        "mutationProbability": 0.2,
        "terminationFitness": 0.5,
        "maxDepth": 17,
        "maxReversions": 100,
        "cacheFitness": false
    }"#;

    let parameters = read_parameters(BufReader::new(json.as_bytes())).expect("cannot read parameters");

    assert_eq!(
        parameters,
        Parameters {
            population_size: 10,
            no_generations: 5,
            no_runs: 3,
            pool_size: Some(8),
            no_elites: 2,
            crossover_probability: 0.7,
            mutation_probability: 0.2,
            termination_fitness: 0.5,
            max_depth: Some(17),
            max_reversions: Some(100),
            cache_fitness: false,
        }
    );
}

#[test]
fn can_use_defaults_for_missing_parameters() {
    let parameters = read_parameters(BufReader::new(r#"{ "noRuns": 4 }"#.as_bytes())).expect("cannot read parameters");

    assert_eq!(parameters, Parameters { no_runs: 4, ..Parameters::default() });
}

#[test]
fn can_reject_unknown_parameter() {
    let result = read_parameters(BufReader::new(r#"{ "populationSiz": 4 }"#.as_bytes()));

    assert!(result.is_err());
}

parameterized_test! {can_derive_reproduction_probability, (crossover, mutation, expected), {
    can_derive_reproduction_probability_impl(crossover, mutation, expected);
}}

can_derive_reproduction_probability! {
    case01: (0.9, 0.1, 0.),
    case02: (0.5, 0.25, 0.25),
    case03: (0., 0., 1.),
}

fn can_derive_reproduction_probability_impl(crossover: Float, mutation: Float, expected: Float) {
    let parameters =
        Parameters { crossover_probability: crossover, mutation_probability: mutation, ..Parameters::default() };

    assert!((parameters.reproduction_probability() - expected).abs() < 1E-9);
}

parameterized_test! {can_validate_parameters, (parameters, expected_error), {
    can_validate_parameters_impl(parameters, expected_error);
}}

can_validate_parameters! {
    case01_valid: (Parameters::default(), None),
    case02_zero_population: (Parameters { population_size: 0, ..Parameters::default() }, Some("population size")),
    case03_sum_exceeds: (
        Parameters { crossover_probability: 0.8, mutation_probability: 0.3, ..Parameters::default() },
        Some("should not exceed 1")
    ),
    case04_negative: (
        Parameters { crossover_probability: -0.1, mutation_probability: 0.1, ..Parameters::default() },
        Some("crossover probability should be in [0, 1]")
    ),
    case05_zero_pool: (Parameters { pool_size: Some(0), ..Parameters::default() }, Some("pool size")),
    case06_zero_depth: (Parameters { max_depth: Some(0), ..Parameters::default() }, Some("max depth")),
    case07_nan_termination: (
        Parameters { termination_fitness: Float::NAN, ..Parameters::default() },
        Some("termination fitness")
    ),
}

fn can_validate_parameters_impl(parameters: Parameters, expected_error: Option<&str>) {
    let result = parameters.validate();

    match (result, expected_error) {
        (Ok(_), None) => {}
        (Err(err), Some(expected)) => assert!(err.to_string().contains(expected), "unexpected error: {err}"),
        (result, expected) => panic!("unexpected result: {result:?}, expected error: {expected:?}"),
    }
}

#[test]
fn can_report_all_validation_errors() {
    let parameters = Parameters { population_size: 0, pool_size: Some(0), ..Parameters::default() };

    let err = parameters.validate().expect_err("should fail");

    assert_eq!(err.to_string(), "population size should be positive, pool size should be positive when specified");
}
