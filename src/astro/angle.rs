//! Angle normalization helpers.

use std::f64::consts::{PI, TAU};

/// Wrap degrees into [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Wrap degrees into (-180, 180].
pub fn normalize_signed_degrees(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Wrap radians into (-PI, PI].
pub fn normalize_radians(angle: f64) -> f64 {
    let mut value = angle % TAU;
    if value > PI {
        value -= TAU;
    } else if value <= -PI {
        value += TAU;
    }
    value
}
