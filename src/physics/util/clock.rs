use std::{fmt::Debug, time::Duration};

/// A clock for physics objects
/// Counts ticks and the simulated time they add up to.
/// It never reads the wall clock, the host's frame loop decides when a tick happens.
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    elapsed: Duration,
    frame: u64,
}

impl Debug for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clock")
            .field("elapsed", &self.elapsed)
            .field("frame", &self.frame)
            .finish()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn get_current_time(&self) -> Duration {
        self.elapsed
    }
    pub fn get_current_frame(&self) -> u64 {
        self.frame
    }
    /// Advance by one frame of the given length
    pub fn update(&mut self, delta: Duration) {
        self.elapsed += delta;
        self.frame += 1;
    }
}
