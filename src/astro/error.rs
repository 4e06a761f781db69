//! Error type for ephemeris provider calls.
//!
//! Provider faults never cross the public boundary of [`crate::astro::compute_event_set`];
//! every call site converts them into an absent value or a fallback search.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors reported by an [`EphemerisProvider`](crate::astro::EphemerisProvider).
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AstroError {
    /// The provider does not offer this capability.
    Unsupported(&'static str),
    /// Observer parameters are out of range.
    InvalidObserver(String),
    /// A computation produced NaN or infinity.
    NonFinite(&'static str),
}

impl Display for AstroError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported(what) => write!(f, "unsupported by provider: {what}"),
            Self::InvalidObserver(msg) => write!(f, "invalid observer: {msg}"),
            Self::NonFinite(what) => write!(f, "non-finite value in {what}"),
        }
    }
}

impl Error for AstroError {}
