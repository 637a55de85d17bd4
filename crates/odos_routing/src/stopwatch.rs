use std::{
    fmt::Display,
    time::{Duration, Instant},
};

use tracing::debug;

/// Wall-clock timer for a named phase of a request.
pub struct Stopwatch<'a> {
    started_at: Instant,
    name: &'a str,
}

impl<'a> Stopwatch<'a> {
    pub fn new(name: &'a str) -> Self {
        Self {
            started_at: Instant::now(),
            name,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Emit the elapsed time as a debug event.
    pub fn report(&self) {
        debug!("{}", self);
    }
}

impl Display for Stopwatch<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]: {:?}", self.name, self.elapsed())
    }
}
