//! Clock valuations for timed-automata-style models.
//!
//! Each named clock measures the time elapsed since its last reset. The
//! distinguished global clock measures absolute elapsed time and serves as
//! the birth value for clocks that have not been mentioned before.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

pub type Time = f64;

/// Name under which the global clock is addressed in name-based operations.
pub const GLOBAL_CLOCK: &str = "global";

// Stored values are kept at a fixed 1e-8 resolution.
const PRECISION_SCALE: f64 = 1e8;

#[inline]
fn quantize(value: Time) -> Time {
    (value * PRECISION_SCALE).round() / PRECISION_SCALE
}

/// A set of clock valuations with a distinguished global clock.
///
/// The global clock is a dedicated field rather than an entry of the map,
/// so it exists for the whole lifetime of the store and cannot be removed
/// or reset through the name-based operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockStore {
    global: Time,
    clocks: HashMap<String, Time>,
}

impl ClockStore {
    /// Creates a store whose global clock starts at `initial`,
    /// with no named clocks tracked yet.
    pub fn new(initial: Time) -> Self {
        Self {
            global: quantize(initial),
            clocks: HashMap::new(),
        }
    }

    /// Lets `delta` time pass over every tracked clock, including the
    /// global one. Sums are quantized to eight fractional digits.
    ///
    /// The set of tracked clocks is unchanged. Negative deltas are not
    /// rejected; whether time may regress is the caller's concern.
    pub fn advance(&mut self, delta: Time) {
        trace!(delta, "advancing clocks");
        for value in self.clocks.values_mut() {
            *value = quantize(*value + delta);
        }
        self.global = quantize(self.global + delta);
    }

    /// Resolves the value of a clock by name.
    ///
    /// A previously-unseen clock is materialized at the current value of the
    /// global clock before being read: a fresh clock starts synchronized
    /// with ambient time, not at zero.
    pub fn get(&mut self, clock: &str) -> Time {
        if clock == GLOBAL_CLOCK {
            return self.global;
        }
        match self.clocks.get(clock) {
            Some(value) => *value,
            None => {
                trace!(clock, at = self.global, "materializing clock");
                self.clocks.insert(clock.to_owned(), self.global);
                self.global
            }
        }
    }

    /// Resets a clock to zero, creating it if it was not tracked yet.
    ///
    /// # Panics
    ///
    /// Panics if `clock` is the global clock; the global clock never resets.
    pub fn reset(&mut self, clock: &str) {
        assert!(
            clock != GLOBAL_CLOCK,
            "the global clock must not be reset"
        );
        trace!(clock, "resetting clock");
        self.clocks.insert(clock.to_owned(), 0.0);
    }

    /// Resets every clock in `clocks` to zero. Resets are independent, so
    /// the iteration order does not affect the outcome.
    ///
    /// # Panics
    ///
    /// Panics if the set contains the global clock.
    pub fn reset_many<I, S>(&mut self, clocks: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for clock in clocks {
            self.reset(clock.as_ref());
        }
    }

    /// Current value of the global clock.
    #[inline]
    pub fn global(&self) -> Time {
        self.global
    }

    /// Whether the name is currently tracked. Does not materialize anything;
    /// the global clock is always tracked.
    pub fn contains(&self, clock: &str) -> bool {
        clock == GLOBAL_CLOCK || self.clocks.contains_key(clock)
    }

    /// Iterates over the named clocks and their values, excluding the
    /// global clock.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Time)> {
        self.clocks.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl Default for ClockStore {
    fn default() -> Self {
        Self::new(0.0)
    }
}
