//! Rise/set event selection.
//!
//! A rise or set is shown as the "current" event for a few hours after it
//! happens, then the dashboard switches to the upcoming one. The selection
//! policy itself is a pure function of three instants so it can be tested
//! without an ephemeris.

use chrono::TimeDelta;

use super::crossing::{ScanPlan, find_altitude_crossing};
use super::provider::EphemerisProvider;
use super::types::{Body, CrossingDirection, Instant, Observer};
use crate::constants::{RECENT_EVENT_WINDOW_HOURS, RISE_SET_LOOKBACK_HOURS};

/// Pick the occurrence worth displaying.
///
/// `previous` only counts when it is not in the future. A previous occurrence
/// at most [`RECENT_EVENT_WINDOW_HOURS`] old wins; otherwise the next one is
/// used, and a stale previous occurrence is the last resort.
pub fn select_occurrence(
    now: Instant,
    previous: Option<Instant>,
    next: Option<Instant>,
) -> Option<Instant> {
    let previous = previous.filter(|&at| at <= now);

    if let Some(at) = previous
        && now - at <= TimeDelta::hours(RECENT_EVENT_WINDOW_HOURS)
    {
        return Some(at);
    }

    next.or(previous)
}

/// First rise (`Ascending`) or set (`Descending`) of `body` at or after
/// `search_start`.
///
/// Uses the provider's own solver when it has one. `Ok(None)` from the
/// provider is a real "no event" answer and is not second-guessed; any error
/// falls back to an altitude crossing at the body's standard rise/set
/// altitude.
pub fn search_rise_set<P: EphemerisProvider + ?Sized>(
    provider: &P,
    observer: &Observer,
    body: Body,
    direction: CrossingDirection,
    search_start: Instant,
) -> Option<Instant> {
    match provider.native_rise_set(body, observer, direction, search_start) {
        Ok(found) => found,
        Err(e) => {
            log_debug!(
                "Native {} {direction:?} search unavailable, scanning altitude: {e}",
                body.name()
            );
            find_altitude_crossing(
                provider,
                observer,
                body,
                body.rise_set_altitude_deg(),
                direction,
                search_start,
                ScanPlan::ALTITUDE,
            )
        }
    }
}

/// The rise or set of `body` to display at `now`.
pub fn pick_rise_set<P: EphemerisProvider + ?Sized>(
    provider: &P,
    observer: &Observer,
    body: Body,
    direction: CrossingDirection,
    now: Instant,
) -> Option<Instant> {
    let next = search_rise_set(provider, observer, body, direction, now);
    let lookback_start = now - TimeDelta::hours(RISE_SET_LOOKBACK_HOURS);
    let previous = search_rise_set(provider, observer, body, direction, lookback_start);
    select_occurrence(now, previous, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn now() -> Instant {
        Utc.with_ymd_and_hms(2024, 5, 10, 21, 0, 0).unwrap()
    }

    #[test]
    fn recent_event_is_preferred() {
        let previous = now() - TimeDelta::hours(1);
        let next = now() + TimeDelta::hours(23);
        assert_eq!(
            select_occurrence(now(), Some(previous), Some(next)),
            Some(previous)
        );
    }

    #[test]
    fn stale_event_gives_way_to_next() {
        let previous = now() - TimeDelta::hours(6);
        let next = now() + TimeDelta::hours(18);
        assert_eq!(
            select_occurrence(now(), Some(previous), Some(next)),
            Some(next)
        );
    }

    #[test]
    fn window_edge_is_inclusive() {
        let previous = now() - TimeDelta::hours(4);
        let next = now() + TimeDelta::hours(20);
        assert_eq!(
            select_occurrence(now(), Some(previous), Some(next)),
            Some(previous)
        );
        let just_outside = previous - TimeDelta::seconds(1);
        assert_eq!(
            select_occurrence(now(), Some(just_outside), Some(next)),
            Some(next)
        );
    }

    #[test]
    fn stale_previous_is_last_resort() {
        let previous = now() - TimeDelta::hours(10);
        assert_eq!(select_occurrence(now(), Some(previous), None), Some(previous));
        assert_eq!(select_occurrence(now(), None, None), None);
    }

    #[test]
    fn future_previous_is_ignored() {
        // The lookback search found nothing before now and ran into the next event.
        let next = now() + TimeDelta::hours(2);
        assert_eq!(select_occurrence(now(), Some(next), Some(next)), Some(next));
        assert_eq!(select_occurrence(now(), Some(next), None), None);
    }
}
