//! Time sources for the engine.
//!
//! Growth is derived from absolute timestamps, so the engine only needs a
//! clock that never runs backwards. Tests and headless runs use
//! [`ManualClock`]; interactive hosts use [`MonotonicClock`].

use std::{cell::Cell, rc::Rc, time::Instant};

pub trait Clock {
    /// Seconds since an arbitrary fixed origin.
    fn now(&self) -> f64;

    /// Called by the engine after every completed tick.
    fn end_tick(&self) {}
}

/// Wall time measured from an [`Instant`] taken at construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one
/// handle while the engine owns another. With a non-zero step the clock
/// also advances by itself at the end of every tick.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
    step: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stepped(step_secs: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(0.0)),
            step: step_secs.max(0.0),
        }
    }

    /// Moves the clock to `secs`. Earlier times are ignored.
    pub fn set(&self, secs: f64) {
        if secs > self.now.get() {
            self.now.set(secs);
        }
    }

    pub fn advance(&self, secs: f64) {
        self.set(self.now.get() + secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }

    fn end_tick(&self) {
        if self.step > 0.0 {
            self.advance(self.step);
        }
    }
}
