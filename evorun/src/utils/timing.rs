use std::time::{Duration, Instant};

/// Implements a performance timer used to measure runs, generations and operators.
#[derive(Clone, Debug)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Starts a new timer.
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    /// Returns elapsed duration.
    pub fn elapsed(&self) -> Duration {
        Instant::now() - self.start
    }

    /// Returns elapsed time in milliseconds.
    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed().as_millis()
    }
}
