use std::panic::Location;
use std::str::FromStr;

use join_lazy_fmt::Join;
use thiserror::Error;

use crate::diagnostics::Fault;

/// What kinds of diagnostics we log. Maps onto [log::LevelFilter], but also accepts the numeric
/// and capitalized spellings people put in `RUST_LOG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoggerLevel {
    /// Don't print any diagnostics
    DontLog,
    /// Print diagnostics with level greater than or equal to `level`
    DoLog { level: log::Level }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid log level: {given}.\nValid ones are: [{valid}]")]
pub struct InvalidLoggerLevel {
    given: String,
    valid: String,
}

impl LoggerLevel {
    const VALID_VALUES: [(&'static str, LoggerLevel); 11] = [
        ("off", LoggerLevel::DontLog),
        ("none", LoggerLevel::DontLog),
        ("error", LoggerLevel::DoLog { level: log::Level::Error }),
        ("warn", LoggerLevel::DoLog { level: log::Level::Warn }),
        ("info", LoggerLevel::DoLog { level: log::Level::Info }),
        ("debug", LoggerLevel::DoLog { level: log::Level::Debug }),
        ("0", LoggerLevel::DontLog),
        ("1", LoggerLevel::DoLog { level: log::Level::Error }),
        ("2", LoggerLevel::DoLog { level: log::Level::Warn }),
        ("3", LoggerLevel::DoLog { level: log::Level::Info }),
        ("4", LoggerLevel::DoLog { level: log::Level::Debug }),
    ];

    pub fn filter(&self) -> log::LevelFilter {
        match self {
            LoggerLevel::DontLog => log::LevelFilter::Off,
            LoggerLevel::DoLog { level } => level.to_level_filter()
        }
    }

    pub fn logs(&self, level: log::Level) -> bool {
        match self {
            LoggerLevel::DontLog => false,
            LoggerLevel::DoLog { level: log_level } => *log_level >= level
        }
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        LoggerLevel::DoLog { level: log::Level::Warn }
    }
}

impl FromStr for LoggerLevel {
    type Err = InvalidLoggerLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowercase = s.trim().to_ascii_lowercase();
        match Self::VALID_VALUES.iter().find(|(str, _)| lowercase == *str) {
            Some((_, level)) => Ok(*level),
            None => Err(InvalidLoggerLevel {
                given: s.to_string(),
                valid: ", ".join(Self::VALID_VALUES.iter().map(|(str, _)| str)).to_string(),
            })
        }
    }
}

/// Initialize `env_logger` at `level`. `RUST_LOG`, when set, overrides it.
pub fn init_logging(level: LoggerLevel) -> Result<(), log::SetLoggerError> {
    env_logger::Builder::new()
        .filter_level(level.filter())
        .parse_env("RUST_LOG")
        .format_timestamp(None)
        .try_init()
}

/// Level the fault hook logs at. Must pass the default filter, or a fault which escapes every
/// [crate::diagnostics::intercept] ends the process silently.
pub const FAULT_HOOK_LEVEL: log::Level = log::Level::Error;

/// Replace the panic hook so a [Fault] is reported through [log] instead of the default
/// `Box<dyn Any>` message. Other panics go to the previous hook.
pub fn install_fault_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        match info.payload().downcast_ref::<Fault>() {
            Some(fault) => log::log!(FAULT_HOOK_LEVEL, "{}", describe_fault(fault, info.location())),
            None => previous(info)
        }
    }));
}

fn describe_fault(fault: &Fault, location: Option<&Location<'_>>) -> String {
    match location {
        Some(location) => format!("Fault raised at {}: {}", location, fault),
        None => format!("Fault raised: {}", fault)
    }
}
