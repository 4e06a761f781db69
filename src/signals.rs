//! Signal handling for watch mode.
//!
//! SIGINT, SIGTERM and SIGHUP stop the refresh loop. SIGUSR2 asks for the
//! configuration to be read again before the next refresh.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM, SIGUSR2},
    iterator::Signals,
};
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Signal handling state shared between threads
#[derive(Clone)]
pub struct SignalState {
    /// Cleared when the process should exit
    pub running: Arc<AtomicBool>,
    /// Set when the configuration should be reloaded
    pub needs_reload: Arc<AtomicBool>,
}

impl SignalState {
    fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
            needs_reload: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Consume a pending reload request.
    pub fn take_reload_request(&self) -> bool {
        self.needs_reload.swap(false, Ordering::SeqCst)
    }

    fn handle(&self, signal: i32) {
        match signal {
            SIGUSR2 => {
                log_debug!("Received SIGUSR2, reloading configuration");
                self.needs_reload.store(true, Ordering::SeqCst);
            }
            _ => {
                log_debug!("Received signal {signal}, shutting down");
                self.running.store(false, Ordering::SeqCst);
            }
        }
    }

    /// Sleep for `interval`, returning early on shutdown or a reload request.
    pub fn wait(&self, interval: Duration) {
        let mut remaining = interval;
        while !remaining.is_zero()
            && self.is_running()
            && !self.needs_reload.load(Ordering::SeqCst)
        {
            let step = remaining.min(POLL_INTERVAL);
            crate::time_source::sleep(step);
            remaining = remaining.saturating_sub(step);
        }
    }
}

/// Install handlers on a background thread.
pub fn setup_signal_handler() -> Result<SignalState> {
    let state = SignalState::new();

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP, SIGUSR2])
        .context("failed to register signal handlers")?;

    let handler_state = state.clone();
    thread::spawn(move || {
        for signal in signals.forever() {
            handler_state.handle(signal);
            if !handler_state.is_running() {
                break;
            }
        }
    });

    Ok(state)
}
