//! Main application entry point and high-level flow coordination.
//!
//! 1. Argument parsing and early exit for help/version
//! 2. Configuration loading and command-line overrides
//! 3. Time source selection (`--at` freezes the clock)
//! 4. One refresh, or a refresh loop in watch mode until a shutdown signal

use anyhow::{Context, Result};
use std::sync::Arc;

use skydash::args::{CliAction, ParsedArgs, RunOptions, display_help, display_version_info};
use skydash::astro::{AnalyticEphemeris, EphemerisProvider, compute_event_set};
use skydash::config::{self, Config, CoordinateOverrides};
use skydash::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use skydash::logger::{Log, write_output};
use skydash::signals::setup_signal_handler;
use skydash::time_source::{self, FixedTimeSource, RealTimeSource};
use skydash::{display, log_debug, log_end, log_error_exit, log_info, log_pipe, log_version, log_warning};

fn main() {
    let parsed = ParsedArgs::from_env();

    match parsed.action {
        CliAction::ShowVersion => {
            display_version_info();
            std::process::exit(EXIT_SUCCESS);
        }
        CliAction::ShowHelp => {
            display_help();
            std::process::exit(EXIT_SUCCESS);
        }
        CliAction::ShowHelpDueToError => {
            display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Run(options) => {
            if let Err(e) = run(&options) {
                Log::set_enabled(true);
                log_pipe!();
                log_error_exit!("{e:#}");
                log_end!();
                std::process::exit(EXIT_FAILURE);
            }
        }
    }
}

fn load_config(options: &RunOptions) -> Result<Config> {
    let mut config = Config::load()?;
    config.apply_overrides(CoordinateOverrides {
        latitude: options.latitude,
        longitude: options.longitude,
        elevation: options.elevation,
    })?;
    if options.use_24_hour {
        config.use_24_hour = Some(true);
    }
    Ok(config)
}

fn run(options: &RunOptions) -> Result<()> {
    Log::set_debug(options.debug_enabled);
    if options.json {
        Log::set_enabled(false);
    }

    config::set_config_dir(options.config_dir.clone())?;
    let mut config = load_config(options)?;

    match &options.at {
        Some(at) => {
            let instant = time_source::parse_instant(at, config.timezone()?)?;
            time_source::init_time_source(Arc::new(FixedTimeSource::new(instant)));
        }
        None => time_source::init_time_source(Arc::new(RealTimeSource)),
    }

    log_version!();
    if options.debug_enabled {
        log_pipe!();
        log_debug!("Debug mode enabled");
        config.log_config();
    }

    let provider = AnalyticEphemeris::new();

    if !options.watch {
        refresh(&provider, &config, options.json)?;
        log_end!();
        return Ok(());
    }

    let signals = setup_signal_handler()?;
    Log::set_timestamps(true);

    while signals.is_running() {
        refresh(&provider, &config, options.json)?;
        signals.wait(config.refresh_interval());

        if signals.take_reload_request() {
            match load_config(options) {
                Ok(reloaded) => {
                    config = reloaded;
                    log_pipe!();
                    log_info!("Configuration reloaded");
                }
                Err(e) => {
                    log_pipe!();
                    log_warning!("Keeping previous configuration: {e:#}");
                }
            }
        }
    }

    log_end!();
    Ok(())
}

fn refresh<P: EphemerisProvider + ?Sized>(provider: &P, config: &Config, json: bool) -> Result<()> {
    let observer = config.observer()?;
    let set = compute_event_set(provider, &observer, time_source::now());

    if json {
        let text = serde_json::to_string_pretty(&set).context("Failed to serialize event set")?;
        write_output(&format!("{text}\n"));
    } else {
        display::log_dashboard(&set, config)?;
    }
    Ok(())
}
