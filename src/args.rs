//! Command-line argument parsing.
//!
//! Flags select the observer, the instant and the output mode. Anything the
//! parser does not recognize turns into [`CliAction::ShowHelpDueToError`].

/// Options for a dashboard run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunOptions {
    pub debug_enabled: bool,
    pub config_dir: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
    /// Raw `--at` value, parsed once the display timezone is known.
    pub at: Option<String>,
    pub use_24_hour: bool,
    pub json: bool,
    pub watch: bool,
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Compute and print the dashboard.
    Run(RunOptions),
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to invalid arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

fn parse_number(flag: &str, value: Option<&String>) -> Option<f64> {
    let Some(value) = value else {
        log_warning!("Missing value for {flag}");
        return None;
    };
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Some(number),
        _ => {
            log_warning!("Invalid number for {flag}: '{value}'");
            None
        }
    }
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first item is the program name and is skipped.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut options = RunOptions::default();
        let mut display_help = false;
        let mut display_version = false;
        let mut invalid = false;

        let mut i = 0;
        while i < args_vec.len() {
            let arg = args_vec[i].as_str();
            let value = args_vec.get(i + 1);
            match arg {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => options.debug_enabled = true,
                "--24h" => options.use_24_hour = true,
                "--json" | "-j" => options.json = true,
                "--watch" | "-w" => options.watch = true,
                "--config" | "-c" => {
                    match value {
                        Some(dir) if !dir.starts_with('-') => options.config_dir = Some(dir.clone()),
                        _ => {
                            log_warning!("Missing directory for {arg}");
                            invalid = true;
                        }
                    }
                    i += 1;
                }
                "--at" | "-a" => {
                    match value {
                        Some(at) => options.at = Some(at.clone()),
                        None => {
                            log_warning!("Missing time for {arg}");
                            invalid = true;
                        }
                    }
                    i += 1;
                }
                "--lat" | "--lon" | "--elevation" => {
                    let number = parse_number(arg, value);
                    match arg {
                        "--lat" => options.latitude = number,
                        "--lon" => options.longitude = number,
                        _ => options.elevation = number,
                    }
                    invalid |= number.is_none();
                    i += 1;
                }
                _ => {
                    log_warning!("Unknown argument: {arg}");
                    invalid = true;
                }
            }
            i += 1;
        }

        if !invalid && options.at.is_some() && options.watch {
            log_warning!("--at and --watch cannot be combined");
            invalid = true;
        }
        if !invalid && options.latitude.is_some() != options.longitude.is_some() {
            log_warning!("--lat and --lon must be given together");
            invalid = true;
        }

        let action = if display_version {
            CliAction::ShowVersion
        } else if invalid {
            CliAction::ShowHelpDueToError
        } else if display_help {
            CliAction::ShowHelp
        } else {
            CliAction::Run(options)
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    crate::logger::write_output(&format!("┗ {}\n", env!("CARGO_PKG_DESCRIPTION")));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("skydash [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("    --lat <degrees>    Observer latitude (overrides config)");
    log_indented!("    --lon <degrees>    Observer longitude (overrides config)");
    log_indented!("    --elevation <m>    Observer elevation in meters");
    log_indented!("-a, --at <time>        Compute for a fixed instant (RFC 3339 or");
    log_indented!("                       \"YYYY-MM-DD HH:MM:SS\" in the display timezone)");
    log_indented!("    --24h              Use a 24-hour clock");
    log_indented!("-j, --json             Print the event set as JSON");
    log_indented!("-w, --watch            Refresh until interrupted");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_end!();
}
