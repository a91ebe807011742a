#[cfg(test)]
#[path = "../../tests/unit/utils/random_test.rs"]
mod random_test;

use crate::utils::{Float, compare_floats};
use rand::prelude::*;
use std::cell::RefCell;
use std::sync::{Mutex, PoisonError};

/// Provides the way to use randomized values in generic way.
pub trait Random: Send + Sync {
    /// Produces integral random value, uniformly distributed on the closed interval [min, max].
    fn uniform_int(&self, min: i32, max: i32) -> i32;

    /// Produces real random value, uniformly distributed on the interval [min, max).
    fn uniform_real(&self, min: Float, max: Float) -> Float;

    /// Flips a coin and returns true if it is "heads", false otherwise.
    fn is_head_not_tails(&self) -> bool {
        self.uniform_int(0, 1) == 1
    }

    /// Tests probability value in (0., 1.) range.
    fn is_hit(&self, probability: Float) -> bool {
        self.uniform_real(0., 1.) < probability.clamp(0., 1.)
    }

    /// Returns an index from collection with probability weight.
    /// Uses exponential distribution where the weights are the rate of the distribution (lambda)
    /// and selects the smallest sampled value.
    fn weighted(&self, weights: &[usize]) -> usize {
        weights
            .iter()
            .zip(0_usize..)
            .map(|(&weight, index)| (-self.uniform_real(0., 1.).ln() / weight as Float, index))
            .min_by(|(a, _), (b, _)| compare_floats(*a, *b))
            .map(|(_, index)| index)
            .unwrap_or(0)
    }
}

/// A default random implementation. It uses a thread local generator unless created as repeatable.
#[derive(Default)]
pub struct DefaultRandom {
    repeatable: Option<Mutex<SmallRng>>,
}

impl DefaultRandom {
    /// Creates an instance of `DefaultRandom` which produces the same sequence for the same seed.
    pub fn new_repeatable(seed: u64) -> Self {
        Self { repeatable: Some(Mutex::new(SmallRng::seed_from_u64(seed))) }
    }

    fn with_rng<T>(&self, action: impl FnOnce(&mut SmallRng) -> T) -> T {
        match &self.repeatable {
            Some(rng) => action(&mut rng.lock().unwrap_or_else(PoisonError::into_inner)),
            None => DEFAULT_RNG.with(|rng| action(&mut rng.borrow_mut())),
        }
    }
}

impl Random for DefaultRandom {
    fn uniform_int(&self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }

        self.with_rng(|rng| rng.gen_range(min..=max))
    }

    fn uniform_real(&self, min: Float, max: Float) -> Float {
        if (min - max).abs() < Float::EPSILON || min > max {
            return min;
        }

        self.with_rng(|rng| rng.gen_range(min..max))
    }

    fn is_head_not_tails(&self) -> bool {
        self.with_rng(|rng| rng.gen_bool(0.5))
    }

    fn is_hit(&self, probability: Float) -> bool {
        // NOTE gen_bool panics on NaN
        let probability = if probability.is_nan() { 0. } else { probability.clamp(0., 1.) };

        self.with_rng(|rng| rng.gen_bool(probability))
    }
}

thread_local! {
    static DEFAULT_RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_entropy());
}
