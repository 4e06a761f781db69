//! Crossing search engine: coarse scan, then bisection.
//!
//! One generic routine, [`find_crossing`], steps forward from a start instant
//! at a fixed interval until a bracket predicate fires, then halves the
//! bracket a fixed number of times. The returned instant is the upper bound of
//! the final bracket, so it always satisfies the "has reached" predicate when
//! the last midpoint evaluation succeeded.
//!
//! Two specializations sit on top of it:
//! - [`find_altitude_crossing`] for geometric altitude thresholds (twilight,
//!   rise/set fallback), monotonic within a day.
//! - [`find_cyclic_crossing`] for quantities that wrap modulo 360 (lunar phase
//!   angle, solar ecliptic longitude). The scan tracks unwrapped values; inside
//!   a bracket the signed angular distance to the target decides each half.
//!
//! With 24 halvings a ten-minute bracket resolves to well under a millisecond;
//! 28 halvings of a six-hour bracket resolve to below 0.1 s.

use chrono::TimeDelta;

use super::angle::normalize_signed_degrees;
use super::provider::EphemerisProvider;
use super::types::{Body, CrossingDirection, Instant, Observer};
use super::unwrap::{CyclicUnwrapper, unwrapped_target};
use crate::constants::*;

/// Step size, horizon and refinement depth for one kind of search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanPlan {
    pub step_seconds: i64,
    pub horizon_seconds: i64,
    pub bisections: u32,
}

impl ScanPlan {
    pub const LUNAR_PHASE: Self = Self {
        step_seconds: CYCLIC_SCAN_STEP_HOURS * 3600,
        horizon_seconds: LUNAR_PHASE_HORIZON_DAYS * 86_400,
        bisections: LUNAR_PHASE_BISECTIONS,
    };

    pub const SOLAR_LONGITUDE: Self = Self {
        step_seconds: CYCLIC_SCAN_STEP_HOURS * 3600,
        horizon_seconds: SOLAR_LONGITUDE_HORIZON_DAYS * 86_400,
        bisections: SOLAR_LONGITUDE_BISECTIONS,
    };

    pub const ALTITUDE: Self = Self {
        step_seconds: ALTITUDE_SCAN_STEP_MINUTES * 60,
        horizon_seconds: ALTITUDE_HORIZON_HOURS * 3600,
        bisections: ALTITUDE_BISECTIONS,
    };

    pub fn horizon(&self) -> TimeDelta {
        TimeDelta::seconds(self.horizon_seconds)
    }

    /// Number of coarse steps needed to cover the horizon.
    pub fn max_steps(&self) -> i64 {
        if self.step_seconds <= 0 || self.horizon_seconds <= 0 {
            return 0;
        }
        (self.horizon_seconds + self.step_seconds - 1) / self.step_seconds
    }

    fn offset(&self, step_index: i64) -> TimeDelta {
        TimeDelta::seconds(self.step_seconds * step_index)
    }
}

/// Scan forward from `start` and refine the first bracketed crossing.
///
/// * `initial` - the sample at `start`, already known to the caller
/// * `sample` - evaluates the tracked quantity; `None` aborts the scan
/// * `brackets` - called once per step, in order, with `(previous, next)`
/// * `reached` - whether a midpoint sample lies at or past the crossing
///
/// A failed midpoint evaluation stops refinement early and the current upper
/// bound is returned.
pub fn find_crossing<T>(
    start: Instant,
    initial: T,
    plan: ScanPlan,
    mut sample: impl FnMut(Instant) -> Option<T>,
    mut brackets: impl FnMut(&T, &T) -> bool,
    mut reached: impl FnMut(&T) -> bool,
) -> Option<Instant> {
    let mut previous_time = start;
    let mut previous = initial;

    for step_index in 1..=plan.max_steps() {
        let next_time = start + plan.offset(step_index);
        let next = sample(next_time)?;

        if brackets(&previous, &next) {
            let mut lo = previous_time;
            let mut hi = next_time;
            for _ in 0..plan.bisections {
                let mid = lo + (hi - lo) / 2;
                let Some(value) = sample(mid) else {
                    break;
                };
                if reached(&value) {
                    hi = mid;
                } else {
                    lo = mid;
                }
            }
            return Some(hi);
        }

        previous_time = next_time;
        previous = next;
    }

    None
}

/// Geometric (unrefracted) altitude of `body`, or `None` on any provider fault.
pub fn geometric_altitude<P: EphemerisProvider + ?Sized>(
    provider: &P,
    body: Body,
    instant: Instant,
    observer: &Observer,
) -> Option<f64> {
    provider
        .body_horizontal(body, instant, observer, false)
        .ok()
        .map(|horizontal| horizontal.altitude)
}

/// Next instant at which the geometric altitude of `body` passes `target_deg`
/// in `direction`.
///
/// Absent when no crossing happens within the plan's horizon, which is normal
/// at high latitudes (polar day or night), or when the provider fails.
pub fn find_altitude_crossing<P: EphemerisProvider + ?Sized>(
    provider: &P,
    observer: &Observer,
    body: Body,
    target_deg: f64,
    direction: CrossingDirection,
    start: Instant,
    plan: ScanPlan,
) -> Option<Instant> {
    let altitude = |at: Instant| geometric_altitude(provider, body, at, observer);
    let initial = altitude(start)?;

    find_crossing(
        start,
        initial,
        plan,
        altitude,
        |&previous, &next| direction.crosses(previous, next, target_deg),
        |&mid| direction.has_reached(mid, target_deg),
    )
}

/// Next instant at which a forward-moving cyclic quantity reaches `target_deg`.
///
/// `current_raw` is the quantity's raw value at `start`. The scan tracks the
/// unwrapped value and brackets the smallest unwrapped target not below
/// `current_raw`. Inside the bracket the quantity advances less than half a
/// turn, so the signed angular distance to the target changes sign exactly at
/// the crossing.
pub fn find_cyclic_crossing(
    start: Instant,
    current_raw: f64,
    target_deg: f64,
    plan: ScanPlan,
    mut sample: impl FnMut(Instant) -> Option<f64>,
) -> Option<Instant> {
    if !current_raw.is_finite() || !target_deg.is_finite() {
        return None;
    }

    let target_unwrapped = unwrapped_target(current_raw, target_deg);
    let mut unwrapper = CyclicUnwrapper::new(current_raw);
    let mut previous_unwrapped = current_raw;

    find_crossing(
        start,
        current_raw,
        plan,
        |at| sample(at).filter(|value| value.is_finite()),
        |_, &next| {
            let next_unwrapped = unwrapper.push(next);
            let bracketed =
                previous_unwrapped <= target_unwrapped && next_unwrapped >= target_unwrapped;
            previous_unwrapped = next_unwrapped;
            bracketed
        },
        |&mid| normalize_signed_degrees(mid - target_deg) >= 0.0,
    )
}

/// Accept a provider-native result only when it lies inside the search window.
fn within_horizon(found: Instant, start: Instant, plan: ScanPlan) -> bool {
    found >= start && found <= start + plan.horizon()
}

/// Next instant at which the lunar phase angle reaches `target_deg`.
///
/// Prefers the provider's own solver; falls back to the internal cyclic
/// search when that solver is unavailable, fails, or finds nothing.
pub fn next_lunar_phase<P: EphemerisProvider + ?Sized>(
    provider: &P,
    target_deg: f64,
    start: Instant,
) -> Option<Instant> {
    let plan = ScanPlan::LUNAR_PHASE;
    match provider.native_phase_search(target_deg, start) {
        Ok(Some(found)) if within_horizon(found, start, plan) => return Some(found),
        Ok(_) => {}
        Err(e) => log_debug!("Native phase search for {target_deg}° unavailable: {e}"),
    }

    let current = provider.lunar_phase_angle(start).ok()?;
    find_cyclic_crossing(start, current, target_deg, plan, |at| {
        provider.lunar_phase_angle(at).ok()
    })
}

/// Next instant at which the Sun's ecliptic longitude reaches `target_deg`.
///
/// Same fallback policy as [`next_lunar_phase`]. Absent when the provider
/// offers neither a native solver nor the longitude primitive.
pub fn next_solar_longitude<P: EphemerisProvider + ?Sized>(
    provider: &P,
    target_deg: f64,
    start: Instant,
) -> Option<Instant> {
    let plan = ScanPlan::SOLAR_LONGITUDE;
    match provider.native_longitude_search(target_deg, start) {
        Ok(Some(found)) if within_horizon(found, start, plan) => return Some(found),
        Ok(_) => {}
        Err(e) => log_debug!("Native longitude search for {target_deg}° unavailable: {e}"),
    }

    let current = provider.solar_ecliptic_longitude(start).ok()?;
    find_cyclic_crossing(start, current, target_deg, plan, |at| {
        provider.solar_ecliptic_longitude(at).ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn epoch() -> Instant {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    fn hours_since(start: Instant, at: Instant) -> f64 {
        (at - start).num_milliseconds() as f64 / 3_600_000.0
    }

    #[test]
    fn plan_step_counts() {
        assert_eq!(ScanPlan::ALTITUDE.max_steps(), 288);
        assert_eq!(ScanPlan::LUNAR_PHASE.max_steps(), 160);
        assert_eq!(ScanPlan::SOLAR_LONGITUDE.max_steps(), 1480);
        let degenerate = ScanPlan {
            step_seconds: 0,
            horizon_seconds: 100,
            bisections: 4,
        };
        assert_eq!(degenerate.max_steps(), 0);
    }

    #[test]
    fn descending_linear_crossing_is_precise() {
        let start = epoch();
        // Falls 1 degree per hour from +4; reaches -6 at exactly 10h.
        let expected = start + TimeDelta::hours(10);
        let altitude = |at: Instant| Some(4.0 - hours_since(start, at));
        let found = find_crossing(
            start,
            4.0,
            ScanPlan::ALTITUDE,
            altitude,
            |&p, &n| CrossingDirection::Descending.crosses(p, n, -6.0),
            |&m| CrossingDirection::Descending.has_reached(m, -6.0),
        )
        .expect("crossing inside horizon");
        assert!((found - expected).num_milliseconds().abs() <= 2_000);
    }

    #[test]
    fn ascending_crossing_ignores_descending_pass() {
        let start = epoch();
        // A V shape: falls to -10 at 12h, rises again; -6 ascending at 16h.
        let expected = start + TimeDelta::hours(16);
        let altitude = |at: Instant| Some((hours_since(start, at) - 12.0).abs() - 10.0);
        let found = find_crossing(
            start,
            2.0,
            ScanPlan::ALTITUDE,
            altitude,
            |&p, &n| CrossingDirection::Ascending.crosses(p, n, -6.0),
            |&m| CrossingDirection::Ascending.has_reached(m, -6.0),
        )
        .expect("ascending crossing");
        assert!((found - expected).num_milliseconds().abs() <= 2_000);
    }

    #[test]
    fn no_crossing_within_horizon_is_absent() {
        let start = epoch();
        let found = find_crossing(
            start,
            30.0,
            ScanPlan::ALTITUDE,
            |_| Some(30.0),
            |&p, &n| CrossingDirection::Descending.crosses(p, n, -18.0),
            |&m| CrossingDirection::Descending.has_reached(m, -18.0),
        );
        assert_eq!(found, None);
    }

    #[test]
    fn failed_sample_aborts_scan() {
        let start = epoch();
        let found = find_crossing(
            start,
            0.0,
            ScanPlan::ALTITUDE,
            |_| None::<f64>,
            |_, _| true,
            |_| true,
        );
        assert_eq!(found, None);
    }

    #[test]
    fn cyclic_crossing_through_wrap() {
        let start = epoch();
        // 12 degrees per day starting at 350: reaches 0 (360) after 20 hours.
        let phase = |at: Instant| Some((350.0 + 0.5 * hours_since(start, at)).rem_euclid(360.0));
        let found = find_cyclic_crossing(start, 350.0, 0.0, ScanPlan::LUNAR_PHASE, phase)
            .expect("new moon within horizon");
        let expected = start + TimeDelta::hours(20);
        assert!((found - expected).num_seconds().abs() <= 1);
    }

    #[test]
    fn cyclic_crossing_half_turn_away() {
        let start = epoch();
        // From 200 the next 180 is 340 degrees ahead: 680 hours at 0.5 deg/h.
        let phase = |at: Instant| Some((200.0 + 0.5 * hours_since(start, at)).rem_euclid(360.0));
        let found = find_cyclic_crossing(start, 200.0, 180.0, ScanPlan::LUNAR_PHASE, phase)
            .expect("full moon within horizon");
        let expected = start + TimeDelta::hours(680);
        assert!((found - expected).num_seconds().abs() <= 1);
    }

    #[test]
    fn cyclic_crossing_beyond_horizon_is_absent() {
        let start = epoch();
        // 0.1 degree per hour never covers 350 degrees in 40 days.
        let phase = |at: Instant| Some((10.0 + 0.1 * hours_since(start, at)).rem_euclid(360.0));
        assert_eq!(
            find_cyclic_crossing(start, 10.0, 0.0, ScanPlan::LUNAR_PHASE, phase),
            None
        );
    }

    #[test]
    fn cyclic_crossing_rejects_non_finite_input() {
        let start = epoch();
        assert_eq!(
            find_cyclic_crossing(start, f64::NAN, 0.0, ScanPlan::LUNAR_PHASE, |_| Some(1.0)),
            None
        );
        assert_eq!(
            find_cyclic_crossing(start, 10.0, 20.0, ScanPlan::LUNAR_PHASE, |_| Some(f64::NAN)),
            None
        );
    }
}
