#[cfg(test)]
#[path = "../../tests/unit/managers/elitism_test.rs"]
mod elitism_test;

use super::*;
use crate::events::{Event, unexpected_event};
use crate::models::compare_programs;

/// Selects the best programs which are carried unmodified into the next generation.
#[derive(Default)]
pub struct ElitismManager;

impl ElitismManager {
    /// Returns `min(no_elites, population size)` best programs, best first. Programs with equal fitness
    /// keep their population order. Listeners can override the selection, but cannot reject it.
    pub fn elites<P: Program>(
        &mut self,
        context: &ExecutionContext<P>,
        config: &ModelSnapshot<P>,
        population: &[P],
    ) -> GenericResult<Vec<P>> {
        let no_elites = config.parameters.no_elites.min(population.len());

        let elites = if no_elites > 0 {
            let mut ranked = population.iter().collect::<Vec<_>>();
            ranked.sort_by(|a, b| compare_programs(*b, *a));
            ranked.into_iter().take(no_elites).cloned().collect()
        } else {
            Vec::new()
        };

        match context.broker.publish(Event::Elitism { elites })? {
            Some(Event::Elitism { elites }) => Ok(elites),
            Some(other) => Err(unexpected_event(EventKind::Elitism, &other)),
            None => Err("elitism event cannot be rejected".into()),
        }
    }
}
