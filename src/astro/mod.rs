//! Astronomical event search engine.
//!
//! Given an observer, an instant and an [`EphemerisProvider`], computes the
//! events a sky dashboard shows: sun and moon rise/set, the six twilight
//! boundaries, the next new and full moon, the next equinoxes and solstices,
//! and the moon's lit-disc geometry.
//!
//! ## Module Structure
//!
//! - [`types`]: Instant, Observer, Body, crossing direction, coordinates
//! - [`provider`]: the ephemeris capability the engine consumes
//! - [`ephemeris`]: built-in analytic Sun and Moon provider
//! - [`unwrap`]: unwrapping of modulo-360 samples
//! - [`crossing`]: generic coarse-scan-then-bisect search and its altitude and
//!   cyclic specializations
//! - [`riseset`]: which rise or set occurrence to display
//! - [`twilight`]: twilight classifier and dawn/dusk crossings
//! - [`moon`]: illumination, phase label, terminator outline, tilt
//! - [`events`]: the per-refresh [`EventSet`]
//!
//! Everything here is synchronous and free of shared state. Absence is a
//! normal outcome for every event and is represented as `None`.

pub mod angle;
pub mod crossing;
pub mod ephemeris;
pub mod error;
pub mod events;
pub mod moon;
pub mod provider;
pub mod riseset;
pub mod twilight;
pub mod types;
pub mod unwrap;

pub use ephemeris::AnalyticEphemeris;
pub use error::AstroError;
pub use events::{EventKind, EventSet, LabelledEvent, compute_event_set};
pub use moon::MoonPhase;
pub use provider::EphemerisProvider;
pub use twilight::{TwilightEvent, TwilightPhase};
pub use types::{Body, CrossingDirection, HorizontalCoordinate, Instant, Observer};
