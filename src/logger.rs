//! Process-wide leveled logger used by engine code.
//!
//! Lifecycle is explicit: `init` once at startup, `teardown` at shutdown.
//! Calls made while no logger is installed are dropped. Messages below the
//! configured minimum level are discarded before they are formatted.
//!
//! The `sloga!` variant always records its message, ignoring the level filter,
//! and then aborts the process. Everything else is best-effort and never
//! terminates. Sink calls are serialised, so the macros work from any thread.
//!
//! ```ignore
//! logger::init(LogLevel::Info, Box::new(TracingSink))?;
//! slogi!("Version Label: {}", label);
//! slogd!("dropped: below Info");
//! logger::teardown();
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, RwLock};
use thiserror::Error;

/// Ordered severity; `Debug < Info < Warn < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse common level names (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Some(LogLevel::Debug),
            "info" | "normal" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" | "quiet" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Destination for recorded messages.
pub trait LogSink: Send + Sync {
    fn record(&self, level: LogLevel, source_file: &str, message: &str);
}

/// Forwards records to `tracing` under the `sgp` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn record(&self, level: LogLevel, source_file: &str, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "sgp", source_file, "{message}"),
            LogLevel::Info => tracing::info!(target: "sgp", source_file, "{message}"),
            LogLevel::Warn => tracing::warn!(target: "sgp", source_file, "{message}"),
            LogLevel::Error => tracing::error!(target: "sgp", source_file, "{message}"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoggerError {
    #[error("logger is already initialized")]
    AlreadyInitialized,
}

struct LoggerState {
    min_level: LogLevel,
    sink: Mutex<Box<dyn LogSink>>,
}

impl LoggerState {
    fn record(&self, level: LogLevel, source_file: &str, message: &str) {
        let sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        sink.record(level, source_file, message);
    }
}

static LOGGER: RwLock<Option<LoggerState>> = RwLock::new(None);

/// Install the process-wide logger.
pub fn init(min_level: LogLevel, sink: Box<dyn LogSink>) -> Result<(), LoggerError> {
    let mut slot = LOGGER.write().unwrap_or_else(|e| e.into_inner());
    if slot.is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }
    *slot = Some(LoggerState {
        min_level,
        sink: Mutex::new(sink),
    });
    Ok(())
}

/// Remove the process-wide logger. Idempotent.
pub fn teardown() {
    let mut slot = LOGGER.write().unwrap_or_else(|e| e.into_inner());
    *slot = None;
}

pub fn is_initialized() -> bool {
    LOGGER.read().unwrap_or_else(|e| e.into_inner()).is_some()
}

/// Whether a message at `level` would reach the sink.
pub fn enabled(level: LogLevel) -> bool {
    LOGGER
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .as_ref()
        .is_some_and(|s| level >= s.min_level)
}

/// Record a message. With `is_assert` set this never returns (see `log_assert`).
pub fn log_message(is_assert: bool, level: LogLevel, source_file: &str, args: fmt::Arguments<'_>) {
    if is_assert {
        log_assert(source_file, args);
    }
    let guard = LOGGER.read().unwrap_or_else(|e| e.into_inner());
    let Some(state) = guard.as_ref() else {
        return;
    };
    if level < state.min_level {
        return;
    }
    let message = args.to_string();
    state.record(level, source_file, &message);
}

/// Record `args` at `Error` regardless of the level filter, then abort.
///
/// The message is also written to stderr; buffered sinks are not flushed.
pub fn log_assert(source_file: &str, args: fmt::Arguments<'_>) -> ! {
    let message = args.to_string();
    {
        let guard = LOGGER.read().unwrap_or_else(|e| e.into_inner());
        if let Some(state) = guard.as_ref() {
            state.record(LogLevel::Error, source_file, &message);
        }
    }
    eprintln!("assertion failed in {source_file}: {message}");
    std::process::abort();
}

#[macro_export]
macro_rules! slogd {
    ($($arg:tt)+) => {
        if $crate::logger::enabled($crate::logger::LogLevel::Debug) {
            $crate::logger::log_message(false, $crate::logger::LogLevel::Debug, file!(), format_args!($($arg)+))
        }
    };
}

#[macro_export]
macro_rules! slogi {
    ($($arg:tt)+) => {
        if $crate::logger::enabled($crate::logger::LogLevel::Info) {
            $crate::logger::log_message(false, $crate::logger::LogLevel::Info, file!(), format_args!($($arg)+))
        }
    };
}

#[macro_export]
macro_rules! slogw {
    ($($arg:tt)+) => {
        if $crate::logger::enabled($crate::logger::LogLevel::Warn) {
            $crate::logger::log_message(false, $crate::logger::LogLevel::Warn, file!(), format_args!($($arg)+))
        }
    };
}

#[macro_export]
macro_rules! sloge {
    ($($arg:tt)+) => {
        if $crate::logger::enabled($crate::logger::LogLevel::Error) {
            $crate::logger::log_message(false, $crate::logger::LogLevel::Error, file!(), format_args!($($arg)+))
        }
    };
}

/// Log at `Error` unconditionally, then abort the process.
#[macro_export]
macro_rules! sloga {
    ($($arg:tt)+) => {
        $crate::logger::log_assert(file!(), format_args!($($arg)+))
    };
}
