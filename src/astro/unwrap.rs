//! Unwrapping of cyclic quantities sampled modulo 360 degrees.
//!
//! Lunar phase angle and solar ecliptic longitude only ever advance, so a raw
//! sample that drops by more than half a turn from its predecessor means the
//! quantity wrapped forward through 360.
//!
//! # Precondition
//!
//! Consecutive samples must be taken closely enough that the true advance
//! between them stays below [`WRAP_THRESHOLD_DEG`]. Faster-moving quantities or
//! coarser sampling make a wrap indistinguishable from a small advance, and the
//! unwrapped sequence silently loses a turn. The six-hour step used by the
//! crossing engine keeps the lunar phase (about 12.2 degrees per day) and the
//! solar longitude (about 1 degree per day) far inside the bound. This is not
//! checked at runtime.

use crate::constants::WRAP_THRESHOLD_DEG;

/// Incremental unwrapper for a forward-moving cyclic quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclicUnwrapper {
    offset: f64,
    previous_raw: f64,
}

impl CyclicUnwrapper {
    /// Start unwrapping from a reference raw value (offset zero).
    pub fn new(reference: f64) -> Self {
        Self {
            offset: 0.0,
            previous_raw: reference,
        }
    }

    /// Consume the next raw sample and return its unwrapped value.
    pub fn push(&mut self, raw: f64) -> f64 {
        self.offset += self.wrap_for(raw);
        self.previous_raw = raw;
        raw + self.offset
    }

    fn wrap_for(&self, raw: f64) -> f64 {
        if raw < self.previous_raw - WRAP_THRESHOLD_DEG {
            360.0
        } else {
            0.0
        }
    }
}

/// Unwrap a whole sequence of raw samples taken after `reference`.
pub fn unwrap_sequence(reference: f64, samples: &[f64]) -> Vec<f64> {
    let mut unwrapper = CyclicUnwrapper::new(reference);
    samples.iter().map(|&raw| unwrapper.push(raw)).collect()
}

/// Smallest unwrapped value congruent to `target` that is not below `base`.
pub fn unwrapped_target(base: f64, target: f64) -> f64 {
    base + (target - base).rem_euclid(360.0)
}
