//! Tracing subscriber setup. Logs share stderr with the menu questions;
//! stdout is left to the banner and the report.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// How much the run logs, from `-q` up to `-vvv`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Warnings such as unreadable files
    Normal,
    /// Progress milestones
    Verbose,
    /// Every excluded path, with source locations
    Debug,
    Trace,
}

impl Verbosity {
    /// `-q` wins over any number of `-v`
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    fn to_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    fn to_filter(self) -> String {
        format!("codedigest={}", self.to_level())
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` overrides the level derived from the flags. Timestamps are
/// shown from `-v` up.
pub fn init(verbosity: Verbosity) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.to_filter()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(verbosity >= Verbosity::Debug)
        .with_line_number(verbosity >= Verbosity::Debug)
        .compact();

    if verbosity <= Verbosity::Normal {
        subscriber.without_time().init();
    } else {
        subscriber.init();
    }
}
