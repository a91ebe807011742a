//! This crate contains an engine which drives evolutionary search over user supplied candidate programs.
//!
//! The engine executes one or more runs. Each run creates an initial population and replaces it generation by
//! generation using elitism, breeding pool selection and a probabilistic choice between crossover, mutation and
//! reproduction. Every stochastic step is published as a life-cycle event, so listeners can accept, override or
//! reject (revert) its result.
//!
//! A representation layer supplies programs, a fitness function and genetic operators through the [`models`]
//! contracts, while [`controller::Controller`] wires everything together:
//!
//! ```
//! use evorun::example::*;
//! use evorun::prelude::*;
//! use std::sync::Arc;
//!
//! let random = Arc::new(DefaultRandom::new_repeatable(7));
//! let parameters = Parameters {
//!     population_size: 20,
//!     no_generations: 10,
//!     no_elites: 2,
//!     max_depth: Some(32),
//!     ..Parameters::default()
//! };
//!
//! let model = create_one_max_model(parameters, random, 16).expect("cannot create model");
//! let mut controller = Controller::new(TelemetryMode::None);
//!
//! let records = controller.run(&model).expect("cannot run evolution");
//! assert_eq!(records.len(), 1);
//! assert!(records[0].best_fitness <= 16.);
//! ```

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod controller;
pub mod events;
pub mod example;
pub mod managers;
pub mod models;
pub mod prelude;
pub mod selection;
pub mod stats;
pub mod utils;
