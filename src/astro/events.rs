//! Per-refresh aggregate of every event and display quantity.
//!
//! [`compute_event_set`] is the single entry point the front end calls. It
//! never fails: provider faults are logged at debug level and surface as
//! absent values.

use serde::Serialize;

use super::crossing::{next_lunar_phase, next_solar_longitude};
use super::moon::{
    MoonPhase, TerminatorPath, build_terminator_path, compute_moon_tilt, illumination_fraction,
    is_waxing,
};
use super::provider::EphemerisProvider;
use super::riseset::pick_rise_set;
use super::twilight::{TwilightEvent, TwilightPhase, TwilightTimes, find_twilight_times};
use super::types::{Body, CrossingDirection, HorizontalCoordinate, Instant, Observer};
use crate::constants::{
    DECEMBER_SOLSTICE_LONGITUDE_DEG, FULL_MOON_PHASE_DEG, JUNE_SOLSTICE_LONGITUDE_DEG,
    MARCH_EQUINOX_LONGITUDE_DEG, NEW_MOON_PHASE_DEG, SEPTEMBER_EQUINOX_LONGITUDE_DEG,
};

/// Every instant the dashboard can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    Sunrise,
    Sunset,
    Moonrise,
    Moonset,
    Twilight(TwilightEvent),
    NewMoon,
    FullMoon,
    MarchEquinox,
    JuneSolstice,
    SeptemberEquinox,
    DecemberSolstice,
}

impl EventKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sunrise => "Sunrise",
            Self::Sunset => "Sunset",
            Self::Moonrise => "Moonrise",
            Self::Moonset => "Moonset",
            Self::Twilight(event) => event.label(),
            Self::NewMoon => "New moon",
            Self::FullMoon => "Full moon",
            Self::MarchEquinox => "March equinox",
            Self::JuneSolstice => "June solstice",
            Self::SeptemberEquinox => "September equinox",
            Self::DecemberSolstice => "December solstice",
        }
    }
}

/// An event and its instant, absent when it does not occur within the search
/// horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelledEvent {
    pub kind: EventKind,
    pub at: Option<Instant>,
}

impl LabelledEvent {
    pub fn new(kind: EventKind, at: Option<Instant>) -> Self {
        Self { kind, at }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunReport {
    /// Apparent (refracted) position for display.
    pub position: Option<HorizontalCoordinate>,
    /// Geometric altitude used for the twilight classification.
    pub geometric_altitude: Option<f64>,
    pub twilight_phase: Option<TwilightPhase>,
    pub sunrise: Option<Instant>,
    pub sunset: Option<Instant>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoonReport {
    /// Apparent (refracted) position for display.
    pub position: Option<HorizontalCoordinate>,
    /// Moon minus Sun ecliptic longitude, [0, 360).
    pub phase_angle: Option<f64>,
    pub illumination: Option<f64>,
    pub phase: Option<MoonPhase>,
    pub waxing: Option<bool>,
    /// Rotation of the lit side in degrees; 0 when undefined.
    pub tilt_deg: f64,
    pub terminator: Option<TerminatorPath>,
    pub terminator_svg: Option<String>,
    pub moonrise: Option<Instant>,
    pub moonset: Option<Instant>,
    pub next_new_moon: Option<Instant>,
    pub next_full_moon: Option<Instant>,
}

/// Next equinoxes and solstices.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Seasons {
    pub march_equinox: Option<Instant>,
    pub june_solstice: Option<Instant>,
    pub september_equinox: Option<Instant>,
    pub december_solstice: Option<Instant>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSet {
    pub computed_at: Instant,
    pub observer: Observer,
    pub sun: SunReport,
    pub moon: MoonReport,
    pub twilight: TwilightTimes,
    pub seasons: Seasons,
}

impl EventSet {
    /// Sun table rows: rise, set and the six twilight boundaries.
    pub fn sun_events(&self) -> Vec<LabelledEvent> {
        let mut events = vec![
            LabelledEvent::new(EventKind::Sunrise, self.sun.sunrise),
            LabelledEvent::new(EventKind::Sunset, self.sun.sunset),
        ];
        events.extend(
            TwilightEvent::ALL
                .into_iter()
                .map(|event| LabelledEvent::new(EventKind::Twilight(event), self.twilight.get(event))),
        );
        events
    }

    pub fn moon_events(&self) -> Vec<LabelledEvent> {
        vec![
            LabelledEvent::new(EventKind::Moonrise, self.moon.moonrise),
            LabelledEvent::new(EventKind::Moonset, self.moon.moonset),
        ]
    }

    pub fn lunation_events(&self) -> Vec<LabelledEvent> {
        vec![
            LabelledEvent::new(EventKind::NewMoon, self.moon.next_new_moon),
            LabelledEvent::new(EventKind::FullMoon, self.moon.next_full_moon),
        ]
    }

    pub fn season_events(&self) -> Vec<LabelledEvent> {
        vec![
            LabelledEvent::new(EventKind::MarchEquinox, self.seasons.march_equinox),
            LabelledEvent::new(EventKind::JuneSolstice, self.seasons.june_solstice),
            LabelledEvent::new(EventKind::SeptemberEquinox, self.seasons.september_equinox),
            LabelledEvent::new(EventKind::DecemberSolstice, self.seasons.december_solstice),
        ]
    }
}

fn live_position<P: EphemerisProvider + ?Sized>(
    provider: &P,
    body: Body,
    now: Instant,
    observer: &Observer,
    apply_refraction: bool,
) -> Option<HorizontalCoordinate> {
    match provider.body_horizontal(body, now, observer, apply_refraction) {
        Ok(position) => Some(position),
        Err(e) => {
            log_debug!("{} position unavailable: {e}", body.name());
            None
        }
    }
}

fn sun_report<P: EphemerisProvider + ?Sized>(
    provider: &P,
    observer: &Observer,
    now: Instant,
) -> SunReport {
    let geometric_altitude =
        live_position(provider, Body::Sun, now, observer, false).map(|p| p.altitude);

    SunReport {
        position: live_position(provider, Body::Sun, now, observer, true),
        geometric_altitude,
        twilight_phase: geometric_altitude.map(TwilightPhase::classify),
        sunrise: pick_rise_set(provider, observer, Body::Sun, CrossingDirection::Ascending, now),
        sunset: pick_rise_set(provider, observer, Body::Sun, CrossingDirection::Descending, now),
    }
}

fn moon_report<P: EphemerisProvider + ?Sized>(
    provider: &P,
    observer: &Observer,
    now: Instant,
    sun_position: Option<HorizontalCoordinate>,
) -> MoonReport {
    let position = live_position(provider, Body::Moon, now, observer, true);

    let phase_angle = match provider.lunar_phase_angle(now) {
        Ok(angle) if angle.is_finite() => Some(angle),
        Ok(_) => None,
        Err(e) => {
            log_debug!("Lunar phase angle unavailable: {e}");
            None
        }
    };
    let waxing = phase_angle.map(is_waxing);
    let terminator = phase_angle.and_then(|angle| build_terminator_path(angle, is_waxing(angle)));

    let tilt_deg = match (position, sun_position) {
        (Some(moon), Some(sun)) => compute_moon_tilt(&moon, &sun).unwrap_or(0.0),
        _ => 0.0,
    };

    MoonReport {
        position,
        phase_angle,
        illumination: phase_angle.map(illumination_fraction),
        phase: phase_angle.and_then(MoonPhase::from_phase_angle),
        waxing,
        tilt_deg,
        terminator_svg: terminator.as_ref().map(TerminatorPath::to_svg_path),
        terminator,
        moonrise: pick_rise_set(provider, observer, Body::Moon, CrossingDirection::Ascending, now),
        moonset: pick_rise_set(provider, observer, Body::Moon, CrossingDirection::Descending, now),
        next_new_moon: next_lunar_phase(provider, NEW_MOON_PHASE_DEG, now),
        next_full_moon: next_lunar_phase(provider, FULL_MOON_PHASE_DEG, now),
    }
}

fn seasons<P: EphemerisProvider + ?Sized>(provider: &P, now: Instant) -> Seasons {
    Seasons {
        march_equinox: next_solar_longitude(provider, MARCH_EQUINOX_LONGITUDE_DEG, now),
        june_solstice: next_solar_longitude(provider, JUNE_SOLSTICE_LONGITUDE_DEG, now),
        september_equinox: next_solar_longitude(provider, SEPTEMBER_EQUINOX_LONGITUDE_DEG, now),
        december_solstice: next_solar_longitude(provider, DECEMBER_SOLSTICE_LONGITUDE_DEG, now),
    }
}

/// Compute every event and display quantity for `observer` at `now`.
///
/// Deterministic for a deterministic provider. Nothing is cached between
/// calls.
pub fn compute_event_set<P: EphemerisProvider + ?Sized>(
    provider: &P,
    observer: &Observer,
    now: Instant,
) -> EventSet {
    let sun = sun_report(provider, observer, now);
    let moon = moon_report(provider, observer, now, sun.position);

    EventSet {
        computed_at: now,
        observer: *observer,
        twilight: find_twilight_times(provider, observer, now),
        seasons: seasons(provider, now),
        sun,
        moon,
    }
}
