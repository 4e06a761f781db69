//! Structured logging with box-drawing output.
//!
//! All terminal output of skydash goes through these macros so the dashboard
//! reads as one continuous block:
//!
//! ```text
//! ┏ skydash v0.1.0 ━━╸
//! ┃
//! ┣ Sun
//! ┃   Altitude: 23.4°
//! ┃   Sunrise:  06:12 AM  (−05h 31m 10s)
//! ╹
//! ```
//!
//! ## Conventions
//!
//! - `log_block_start!` opens a new conceptual block (`┃` spacer, then `┣ message`).
//! - `log_decorated!` continues a block with `┣ message`.
//! - `log_indented!` nests details under a block line (`┃   message`).
//! - `log_pipe!` inserts a bare `┃` spacer, typically before a semantic message.
//! - `log_version!` and `log_end!` open and close the whole output.
//! - `log_info!`, `log_warning!`, `log_error!` and `log_debug!` carry a
//!   `[LEVEL]` tag. `log_debug!` is silent unless debug output was enabled.
//! - `log_error_exit!` closes the block with `┗` before the process exits.
//!
//! Logging can be switched off entirely (JSON output, tests) with
//! [`Log::set_enabled`].

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);
static TIMESTAMPS_ENABLED: AtomicBool = AtomicBool::new(false);

pub struct Log;

impl Log {
    /// Enable or disable all output.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Enable `log_debug!` output.
    pub fn set_debug(enabled: bool) {
        DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_debug_enabled() -> bool {
        DEBUG_ENABLED.load(Ordering::SeqCst)
    }

    /// Prefix every line with the refresh time (watch mode).
    pub fn set_timestamps(enabled: bool) {
        TIMESTAMPS_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// `[HH:MM:SS] ` from the active time source, or nothing.
    pub fn get_timestamp_prefix() -> String {
        if TIMESTAMPS_ENABLED.load(Ordering::SeqCst) && crate::time_source::is_initialized() {
            let now = crate::time_source::now().with_timezone(&chrono::Local);
            format!("[{}] ", now.format("%H:%M:%S"))
        } else {
            String::new()
        }
    }

    /// Write `lead` and `message` as one line, repeating the timestamp prefix
    /// on every line of a multi-line lead.
    pub fn emit(lead: &str, message: &str) {
        if !Self::is_enabled() {
            return;
        }
        let prefix = Self::get_timestamp_prefix();
        let mut text = String::new();
        let mut lines = lead.split('\n').peekable();
        while let Some(line) = lines.next() {
            text.push_str(&prefix);
            text.push_str(line);
            if lines.peek().is_some() {
                text.push('\n');
            }
        }
        text.push_str(message);
        text.push('\n');
        write_output(&text);
    }
}

/// Route formatted text to stdout.
pub fn write_output(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

// # Logging Macros

/// Log a decorated message, part of an existing block.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)+) => {
        $crate::logger::Log::emit("┣ ", &format!($($arg)+))
    };
}

/// Log an indented detail line.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)+) => {
        $crate::logger::Log::emit("┃   ", &format!($($arg)+))
    };
}

/// Log a bare pipe for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::logger::Log::emit("┃", "")
    };
}

/// Start a new block of related lines.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)+) => {
        $crate::logger::Log::emit("┃\n┣ ", &format!($($arg)+))
    };
}

/// Log the application version header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::logger::Log::emit(
            "",
            &format!("┏ skydash v{} ━━╸", env!("CARGO_PKG_VERSION")),
        )
    };
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::logger::Log::emit("╹", "")
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {
        $crate::logger::Log::emit("┣[\x1b[32mINFO\x1b[0m] ", &format!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)+) => {
        $crate::logger::Log::emit("┣[\x1b[33mWARNING\x1b[0m] ", &format!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::logger::Log::emit("┣[\x1b[31mERROR\x1b[0m] ", &format!($($arg)+))
    };
}

/// Log an error and close the block with a terminal corner.
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)+) => {
        $crate::logger::Log::emit("┃\n┗[\x1b[31mERROR\x1b[0m] ", &format!($($arg)+))
    };
}

/// Log a debug message. Silent unless debug output is enabled.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {
        if $crate::logger::Log::is_debug_enabled() {
            $crate::logger::Log::emit("┣[\x1b[36mDEBUG\x1b[0m] ", &format!($($arg)+))
        }
    };
}
