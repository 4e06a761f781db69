//! Application-wide constants and default values.
//!
//! Search step sizes, horizons and bisection counts live here next to the
//! configuration defaults so every tunable is in one place.

// # Cyclic crossing search (lunar phase, solar longitude)

/// Coarse scan step. Keeps the per-step advance of both cyclic quantities far
/// below the unwrap threshold.
pub const CYCLIC_SCAN_STEP_HOURS: i64 = 6;
/// Long enough to contain at least one full synodic month.
pub const LUNAR_PHASE_HORIZON_DAYS: i64 = 40;
/// Long enough to contain at least one full tropical year.
pub const SOLAR_LONGITUDE_HORIZON_DAYS: i64 = 370;
pub const LUNAR_PHASE_BISECTIONS: u32 = 24;
pub const SOLAR_LONGITUDE_BISECTIONS: u32 = 28;
/// A drop larger than this between consecutive raw samples is a forward wrap.
pub const WRAP_THRESHOLD_DEG: f64 = 180.0;

// # Altitude crossing search (twilight, rise/set fallback)

pub const ALTITUDE_SCAN_STEP_MINUTES: i64 = 10;
pub const ALTITUDE_HORIZON_HOURS: i64 = 48;
pub const ALTITUDE_BISECTIONS: u32 = 24;

// # Rise/set selection

/// How far back the "most recent" occurrence is searched for.
pub const RISE_SET_LOOKBACK_HOURS: i64 = 24;
/// A past occurrence this recent is still shown as the current event.
pub const RECENT_EVENT_WINDOW_HOURS: i64 = 4;

// # Target angles (degrees)

pub const NEW_MOON_PHASE_DEG: f64 = 0.0;
pub const FULL_MOON_PHASE_DEG: f64 = 180.0;
pub const MARCH_EQUINOX_LONGITUDE_DEG: f64 = 0.0;
pub const JUNE_SOLSTICE_LONGITUDE_DEG: f64 = 90.0;
pub const SEPTEMBER_EQUINOX_LONGITUDE_DEG: f64 = 180.0;
pub const DECEMBER_SOLSTICE_LONGITUDE_DEG: f64 = 270.0;

// # Moon disc geometry (display space)

pub const TERMINATOR_STEPS: usize = 80;
pub const MOON_DISC_CENTER: f64 = 50.0;
pub const MOON_DISC_RADIUS: f64 = 48.0;
/// Projected vectors shorter than this make the tilt undefined.
pub const DEGENERATE_VECTOR_MAGNITUDE: f64 = 1e-6;

// # Observer ranges

pub const MINIMUM_LATITUDE: f64 = -90.0;
pub const MAXIMUM_LATITUDE: f64 = 90.0;
pub const MINIMUM_LONGITUDE: f64 = -180.0;
pub const MAXIMUM_LONGITUDE: f64 = 180.0;
pub const MINIMUM_ELEVATION: f64 = -500.0;

// # Configuration defaults

pub const CONFIG_DIR_NAME: &str = "skydash";
pub const CONFIG_FILE_NAME: &str = "skydash.toml";
pub const DEFAULT_ELEVATION: f64 = 0.0;
pub const DEFAULT_USE_24_HOUR: bool = false;
pub const DEFAULT_REFRESH_INTERVAL: u64 = 1; // seconds
pub const MINIMUM_REFRESH_INTERVAL: u64 = 1;
pub const MAXIMUM_REFRESH_INTERVAL: u64 = 3600;

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
