//! Clock abstraction: real system time or a fixed instant.
//!
//! The dashboard refresh asks this module for "now". `--at` installs a
//! [`FixedTimeSource`] so output is reproducible; otherwise the real clock is
//! used. The source is chosen once per process.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Duration as StdDuration;

static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Wait before the next refresh.
    fn sleep(&self, duration: StdDuration);
}

pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&self, duration: StdDuration) {
        std::thread::sleep(duration);
    }
}

/// Always reports the same instant. Sleeping returns immediately.
pub struct FixedTimeSource {
    instant: DateTime<Utc>,
}

impl FixedTimeSource {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn sleep(&self, _duration: StdDuration) {}
}

/// Initialize the global time source (call once at startup).
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

fn source() -> &'static Arc<dyn TimeSource> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource))
}

pub fn now() -> DateTime<Utc> {
    source().now()
}

pub fn sleep(duration: StdDuration) {
    source().sleep(duration)
}

/// Parse an instant given on the command line.
///
/// Accepts RFC 3339 (`2024-06-21T12:00:00Z`, `2024-06-21T14:00:00+02:00`) or
/// `YYYY-MM-DD HH:MM:SS` interpreted in `tz`, falling back to the system
/// timezone.
pub fn parse_instant(s: &str, tz: Option<chrono_tz::Tz>) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").with_context(|| {
        format!("Invalid time '{s}'. Use RFC 3339 or YYYY-MM-DD HH:MM:SS")
    })?;

    let resolved = match tz {
        Some(tz) => tz
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc)),
        None => chrono::Local
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc)),
    };

    match resolved {
        Some(instant) => Ok(instant),
        None => bail!("Time '{s}' is ambiguous or does not exist in the selected timezone"),
    }
}
