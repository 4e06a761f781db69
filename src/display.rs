//! Formatting and terminal rendering of an [`EventSet`].
//!
//! The formatters are pure functions of their inputs so the same strings can be
//! produced for any "now". [`log_dashboard`] lays them out through the logger
//! macros.

use anyhow::Result;
use chrono::{DateTime, Local};
use chrono_tz::Tz;
use std::cmp::Ordering;

use crate::astro::{EventSet, Instant, LabelledEvent};
use crate::config::Config;

const MILLIS_PER_DAY: f64 = 86_400_000.0;
const MINUS_SIGN: char = '\u{2212}';
const NO_BREAK_SPACE: char = '\u{a0}';

fn format_in_zone(instant: Instant, tz: Option<Tz>, pattern: &str) -> String {
    match tz {
        Some(tz) => instant.with_timezone(&tz).format(pattern).to_string(),
        None => DateTime::<Local>::from(instant).format(pattern).to_string(),
    }
}

/// Clock time of an event, `"No event"` when it does not occur.
pub fn format_time(instant: Option<Instant>, use_24_hour: bool, tz: Option<Tz>) -> String {
    match instant {
        Some(instant) if use_24_hour => format_in_zone(instant, tz, "%H:%M"),
        Some(instant) => format_in_zone(instant, tz, "%I:%M %p"),
        None => "No event".to_string(),
    }
}

/// Calendar date and clock time, for events days or months away.
pub fn format_date_time(instant: Option<Instant>, use_24_hour: bool, tz: Option<Tz>) -> String {
    match instant {
        Some(instant) if use_24_hour => format_in_zone(instant, tz, "%Y-%m-%d %H:%M"),
        Some(instant) => format_in_zone(instant, tz, "%Y-%m-%d %I:%M %p"),
        None => "No event".to_string(),
    }
}

/// Signed time remaining until `target`.
///
/// Past events carry a minus sign, future ones a no-break space so columns
/// stay aligned.
pub fn format_countdown(target: Option<Instant>, now: Instant) -> String {
    let Some(target) = target else {
        return "--".to_string();
    };
    let diff_ms = (target - now).num_milliseconds();
    let diff_seconds = (diff_ms as f64 / 1000.0).round() as i64;
    if diff_seconds == 0 {
        return "Now".to_string();
    }

    let sign = if diff_seconds < 0 {
        MINUS_SIGN
    } else {
        NO_BREAK_SPACE
    };
    let total = diff_seconds.unsigned_abs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours == 0 {
        format!("{sign}{minutes:02}m {seconds:02}s")
    } else {
        format!("{sign}{hours:02}h {minutes:02}m {seconds:02}s")
    }
}

/// Days until `target` with one decimal.
pub fn format_days_until(target: Option<Instant>, now: Instant) -> String {
    let Some(target) = target else {
        return "--".to_string();
    };
    let diff_days = (target - now).num_milliseconds() as f64 / MILLIS_PER_DAY;
    if diff_days.abs() < 0.01 {
        return "Now".to_string();
    }
    format!("{diff_days:.1}d")
}

/// Gap between two table rows, rounded to whole minutes.
pub fn format_delta_minutes(minutes: Option<f64>) -> String {
    let Some(rounded) = minutes.map(f64::round).filter(|m| m.is_finite()) else {
        return "--".to_string();
    };
    if rounded == 0.0 {
        return "+0m".to_string();
    }

    let sign = if rounded > 0.0 { '+' } else { '-' };
    let total = rounded.abs() as u64;
    let hours = total / 60;
    let minutes = total % 60;

    if hours == 0 {
        format!("{sign}{minutes:02}m")
    } else {
        format!("{sign}{hours:02}h {minutes:02}m")
    }
}

pub fn format_angle(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.1}°"),
        _ => "--".to_string(),
    }
}

pub fn format_coord(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.4}"),
        _ => "--".to_string(),
    }
}

/// Order events for display: upcoming first, then past, each group by
/// distance from `now`. Absent events go last, keeping their relative order.
pub fn order_events(events: &[LabelledEvent], now: Instant) -> Vec<LabelledEvent> {
    // (group, distance): group 0 = upcoming, 1 = past or absent
    let key = |event: &LabelledEvent| match event.at {
        Some(at) => {
            let diff = (at - now).num_milliseconds();
            (u8::from(diff < 0), Some(diff.unsigned_abs()))
        }
        None => (1, None),
    };

    let mut ordered = events.to_vec();
    ordered.sort_by(|a, b| {
        let (group_a, dist_a) = key(a);
        let (group_b, dist_b) = key(b);
        group_a.cmp(&group_b).then_with(|| match (dist_a, dist_b) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
    });
    ordered
}

/// Minutes between each event and the closest present event above it.
///
/// `None` for absent events and for the first present one.
pub fn event_deltas(events: &[LabelledEvent]) -> Vec<Option<f64>> {
    let mut previous: Option<Instant> = None;
    events
        .iter()
        .map(|event| {
            let delta = match (event.at, previous) {
                (Some(at), Some(prev)) => Some((at - prev).num_milliseconds() as f64 / 60_000.0),
                _ => None,
            };
            if event.at.is_some() {
                previous = event.at;
            }
            delta
        })
        .collect()
}

fn log_event_table(events: &[LabelledEvent], now: Instant, use_24_hour: bool, tz: Option<Tz>) {
    let ordered = order_events(events, now);
    let deltas = event_deltas(&ordered);
    for (event, delta) in ordered.iter().zip(deltas) {
        log_indented!(
            "{:<18} {:>9}  {:>12}  {:>8}",
            event.kind.label(),
            format_time(event.at, use_24_hour, tz),
            format_countdown(event.at, now),
            format_delta_minutes(delta)
        );
    }
}

fn log_far_events(events: &[LabelledEvent], now: Instant, use_24_hour: bool, tz: Option<Tz>) {
    for event in events {
        log_indented!(
            "{:<18} {:>19}  {:>7}",
            event.kind.label(),
            format_date_time(event.at, use_24_hour, tz),
            format_days_until(event.at, now)
        );
    }
}

/// Print the full dashboard for one refresh.
pub fn log_dashboard(set: &EventSet, config: &Config) -> Result<()> {
    let tz = config.timezone()?;
    let use_24_hour = config.use_24_hour();
    let now = set.computed_at;

    log_block_start!("{}", config.location_label());
    log_indented!(
        "Coordinates: {}, {}  ({} m)",
        format_coord(Some(set.observer.latitude)),
        format_coord(Some(set.observer.longitude)),
        set.observer.elevation_meters
    );
    log_indented!(
        "Time: {}",
        format_date_time(Some(now), use_24_hour, tz)
    );

    log_block_start!("Sun");
    log_indented!(
        "Altitude {}  Azimuth {}  ({})",
        format_angle(set.sun.position.map(|p| p.altitude)),
        format_angle(set.sun.position.map(|p| p.azimuth)),
        set.sun.twilight_phase.map_or("--", |phase| phase.label())
    );
    log_event_table(&set.sun_events(), now, use_24_hour, tz);

    log_block_start!("Moon");
    log_indented!(
        "Altitude {}  Azimuth {}",
        format_angle(set.moon.position.map(|p| p.altitude)),
        format_angle(set.moon.position.map(|p| p.azimuth))
    );
    log_indented!(
        "{}, {} illuminated, tilt {}",
        set.moon.phase.map_or("--", |phase| phase.label()),
        set.moon
            .illumination
            .map_or_else(|| "--".to_string(), |f| format!("{:.0}%", f * 100.0)),
        format_angle(Some(set.moon.tilt_deg))
    );
    log_event_table(&set.moon_events(), now, use_24_hour, tz);

    log_block_start!("Lunations");
    log_far_events(&set.lunation_events(), now, use_24_hour, tz);

    log_block_start!("Seasons");
    log_far_events(&set.season_events(), now, use_24_hour, tz);

    Ok(())
}
