use std::time::{Duration, Instant};

use tracing::debug;

/// Simple stopwatch helper for wall-clock measurements.
pub struct Stopwatch {
    label: &'static str,
    start: Instant,
}

impl Stopwatch {
    pub fn start_new(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Logs the elapsed time at debug level and returns it.
    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        debug!(phase = self.label, elapsed_ms = elapsed.as_secs_f64() * 1000.0, "phase finished");
        elapsed
    }
}
