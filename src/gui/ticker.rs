use super::Config;
use std::time::{Duration, Instant};

/// Multiplier applied to the base generation rate, doubled or halved in steps.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct TimeScale(f64);

impl Default for TimeScale {
    fn default() -> Self {
        Self(1.)
    }
}

impl TimeScale {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn faster(&mut self) {
        self.0 = (self.0 * 2.).clamp(Config::MIN_TIME_SCALE, Config::MAX_TIME_SCALE);
    }

    pub fn slower(&mut self) {
        self.0 = (self.0 / 2.).clamp(Config::MIN_TIME_SCALE, Config::MAX_TIME_SCALE);
    }
}

impl std::fmt::Display for TimeScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Turns wall-clock time into a whole number of fixed-rate generation ticks.
#[derive(Debug, Default)]
pub struct Ticker {
    pending_ticks: f64,
    last_poll: Option<Instant>,
}

impl Ticker {
    /// Ticks due since the previous poll at `rate` ticks per second.
    ///
    /// The first poll after [`reset`](Self::reset) only starts the clock.
    pub fn poll(&mut self, rate: f64) -> u32 {
        let now = Instant::now();
        let elapsed = self
            .last_poll
            .map_or(Duration::ZERO, |last| now.duration_since(last));
        self.last_poll = Some(now);
        self.advance(elapsed, rate)
    }

    /// Accounts for `elapsed` time at `rate` ticks per second and returns the ticks due.
    ///
    /// At most [`Config::MAX_TICKS_PER_FRAME`] are returned; a larger backlog is dropped.
    pub fn advance(&mut self, elapsed: Duration, rate: f64) -> u32 {
        if rate <= 0. {
            return 0;
        }
        self.pending_ticks += elapsed.as_secs_f64() * rate;
        let due = self.pending_ticks.floor();
        self.pending_ticks -= due;
        if due >= Config::MAX_TICKS_PER_FRAME as f64 {
            self.pending_ticks = 0.;
            Config::MAX_TICKS_PER_FRAME
        } else {
            due as u32
        }
    }

    /// Forgets accumulated time, e.g. while the simulation is paused.
    pub fn reset(&mut self) {
        self.pending_ticks = 0.;
        self.last_poll = None;
    }
}
