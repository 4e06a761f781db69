//! Moon disc geometry: illumination, phase naming, terminator outline and the
//! apparent tilt of the lit side as seen from the observer.

use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector3;
use serde::Serialize;

use super::angle::{normalize_degrees, normalize_radians};
use super::types::HorizontalCoordinate;
use crate::constants::{
    DEGENERATE_VECTOR_MAGNITUDE, MOON_DISC_CENTER, MOON_DISC_RADIUS, TERMINATOR_STEPS,
};

/// Illuminated fraction of the disc for a phase angle in degrees.
///
/// 0 at new moon, 1 at full moon, 0.5 at either quarter.
pub fn illumination_fraction(phase_angle_deg: f64) -> f64 {
    (1.0 - phase_angle_deg.to_radians().cos()) / 2.0
}

/// The moon is waxing for phase angles in [0, 180).
pub fn is_waxing(phase_angle_deg: f64) -> bool {
    phase_angle_deg < 180.0
}

/// Named phase, one per 45 degree sector centered on the principal phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    ThirdQuarter,
    WaningCrescent,
}

impl MoonPhase {
    const SECTORS: [Self; 8] = [
        Self::NewMoon,
        Self::WaxingCrescent,
        Self::FirstQuarter,
        Self::WaxingGibbous,
        Self::FullMoon,
        Self::WaningGibbous,
        Self::ThirdQuarter,
        Self::WaningCrescent,
    ];

    /// Sector containing `phase_angle_deg`. The angle is shifted by half a
    /// sector first, so New Moon covers [337.5, 22.5).
    pub fn from_phase_angle(phase_angle_deg: f64) -> Option<Self> {
        if !phase_angle_deg.is_finite() {
            return None;
        }
        let index = (normalize_degrees(phase_angle_deg + 22.5) / 45.0).floor() as usize;
        Some(Self::SECTORS[index.min(Self::SECTORS.len() - 1)])
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NewMoon => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::FullMoon => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::ThirdQuarter => "Third Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }
}

/// Point in the 100x100 display box, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiscPoint {
    pub x: f64,
    pub y: f64,
}

/// Closed outline of the lit part of the disc: terminator from top to bottom,
/// then back up along the lit limb.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerminatorPath {
    pub points: Vec<DiscPoint>,
}

impl TerminatorPath {
    /// SVG path data, `M x y L x y ... Z` with two decimals.
    pub fn to_svg_path(&self) -> String {
        let mut parts = Vec::with_capacity(self.points.len() + 1);
        for (i, point) in self.points.iter().enumerate() {
            let command = if i == 0 { 'M' } else { 'L' };
            parts.push(format!("{command} {:.2} {:.2}", point.x, point.y));
        }
        if !parts.is_empty() {
            parts.push("Z".to_string());
        }
        parts.join(" ")
    }

    /// Enclosed area in display units (shoelace formula).
    ///
    /// Lets geometry checks compare the outline with the illuminated fraction.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice.abs() / 2.0
    }
}

/// Outline of the illuminated region for a phase angle.
///
/// The terminator is an ellipse half with semi-axis `k = cos(180 - phase)`;
/// the limb is the lit half circle. Independent of the observer. Returns
/// `None` for a non-finite phase angle.
pub fn build_terminator_path(phase_angle_deg: f64, waxing: bool) -> Option<TerminatorPath> {
    let k = (180.0 - phase_angle_deg).to_radians().cos();
    if !k.is_finite() {
        return None;
    }
    let dir = if waxing { 1.0 } else { -1.0 };

    let sample = |i: usize, x_scale: f64| {
        let y = -1.0 + 2.0 * i as f64 / TERMINATOR_STEPS as f64;
        let half_width = (1.0 - y * y).max(0.0).sqrt();
        DiscPoint {
            x: MOON_DISC_CENTER + x_scale * half_width * MOON_DISC_RADIUS,
            y: MOON_DISC_CENTER + y * MOON_DISC_RADIUS,
        }
    };

    let terminator = (0..=TERMINATOR_STEPS).map(|i| sample(i, -dir * k));
    let limb = (0..=TERMINATOR_STEPS).rev().map(|i| sample(i, dir));

    Some(TerminatorPath {
        points: terminator.chain(limb).collect(),
    })
}

/// Unit vector for a horizontal coordinate: x east, y north, z up.
fn horizon_vector(position: &HorizontalCoordinate) -> Vector3<f64> {
    let altitude = position.altitude.to_radians();
    let azimuth = position.azimuth.to_radians();
    Vector3::new(
        altitude.cos() * azimuth.sin(),
        altitude.cos() * azimuth.cos(),
        altitude.sin(),
    )
}

/// Rotation of the moon's lit side relative to the observer's vertical, in
/// degrees within (-180, 180].
///
/// Both directions are projected onto the plane perpendicular to the line of
/// sight to the moon. The angle is measured from local "up" towards "right"
/// and shifted by a quarter turn, so a sun directly to the moon's right gives
/// zero. `None` when either input is non-finite, when the moon is at the
/// zenith, or when the sun lies along the moon's line of sight.
pub fn compute_moon_tilt(
    moon: &HorizontalCoordinate,
    sun: &HorizontalCoordinate,
) -> Option<f64> {
    if !moon.is_finite() || !sun.is_finite() {
        return None;
    }

    let m = horizon_vector(moon).try_normalize(0.0)?;
    let s = horizon_vector(sun).try_normalize(0.0)?;
    let zenith = Vector3::z();

    let up = (zenith - m * m.dot(&zenith)).try_normalize(DEGENERATE_VECTOR_MAGNITUDE)?;
    let right = up.cross(&m);
    let sun_projected = (s - m * s.dot(&m)).try_normalize(DEGENERATE_VECTOR_MAGNITUDE)?;

    let angle = sun_projected.dot(&right).atan2(sun_projected.dot(&up));
    let tilt = normalize_radians(angle - FRAC_PI_2).to_degrees();
    tilt.is_finite().then_some(tilt)
}
