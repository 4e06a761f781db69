//! # Skydash Library
//!
//! Internal library for the skydash binary.
//!
//! This library exists to enable testing of the event engine and provide clean
//! separation between CLI dispatch (main.rs) and application logic.
//!
//! ## Architecture
//!
//! - **Engine**: `astro` computes sun, moon, twilight, lunation and season
//!   events from an ephemeris provider
//! - **Configuration**: `config` module for TOML-based settings
//! - **Presentation**: `display` formats an event set for the terminal
//! - **Infrastructure**: argument parsing, signal handling, logging and the
//!   time source

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod astro;
pub mod config;
pub mod constants;
pub mod display;
pub mod signals;
pub mod time_source;
