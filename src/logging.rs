use std::fs::File;
use std::str::FromStr;
use std::{error::Error, fmt, io};

use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode, WriteLogger};

/// Terminal log level (`off`, `error`, `warn`, `info`, `debug`, `trace`).
pub const LEVEL_VAR: &str = "RBTREE_LOG";
/// If set, everything down to `debug` is also written to this file.
pub const FILE_VAR: &str = "RBTREE_LOG_FILE";

const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

#[derive(Debug)]
pub enum LoggingError {
    LogFile(io::Error),
    AlreadyInitialized,
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoggingError::LogFile(e) => write!(f, "LoggingError: could not create log file: {e}"),
            LoggingError::AlreadyInitialized => write!(f, "LoggingError: a logger is already installed"),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoggingError::LogFile(e) => Some(e),
            LoggingError::AlreadyInitialized => None,
        }
    }
}

/// Parses a level name, falling back to `warn` for anything missing or unrecognized.
pub fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| LevelFilter::from_str(v.trim()).ok())
        .unwrap_or(DEFAULT_LEVEL)
}

/// Installs the global logger, configured from [`LEVEL_VAR`] and [`FILE_VAR`].
pub fn initialize_logging() -> Result<(), LoggingError> {
    let level = parse_level(std::env::var(LEVEL_VAR).ok().as_deref());

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto),
    ];
    if let Some(path) = std::env::var_os(FILE_VAR) {
        let file = File::create(path).map_err(LoggingError::LogFile)?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file));
    }

    CombinedLogger::init(loggers).map_err(|_| LoggingError::AlreadyInitialized)
}
