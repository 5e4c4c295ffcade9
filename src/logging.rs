//! Tracing initialization for the binary.
//! Builds a subscriber with EnvFilter, supports compact or JSON formats, and optional file logging.
//!
//! Behavior:
//! - The filter comes from the configured LogLevel (no RUST_LOG override here).
//! - Console output goes to stderr so command results on stdout stay pipeable.
//! - If `log_file` is provided and passes safety checks, a non-blocking file layer is added.
//!   File logging is refused if any ancestor of the file path is a symlink.

use anyhow::Result;
use chrono::Local;
use std::fmt as stdfmt;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::util::SubscriberInitExt;

use sgp_fileman::output as out;
use sgp_fileman::platform::open_log_file_secure_append;
use sgp_fileman::{LogLevel, path_has_symlink_ancestor};

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%d/%m/%y %H:%M:%S"))
    }
}

#[inline]
fn env_filter_from_level(lvl: LogLevel) -> EnvFilter {
    EnvFilter::new(lvl.as_str())
}

/// Try to open a non-blocking file writer for logging:
/// - Refuse if any ancestor is a symlink
/// - Open file for append (creating parents) and wrap with non_blocking
fn maybe_open_non_blocking_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    match path_has_symlink_ancestor(path) {
        Ok(true) => {
            out::print_warn(&format!(
                "Refusing to enable file logging: ancestor of {} is a symlink",
                path.display()
            ));
            return None;
        }
        Err(e) => {
            out::print_warn(&format!(
                "Error checking log path {} for symlinks: {}",
                path.display(),
                e
            ));
            return None;
        }
        Ok(false) => {}
    }

    match open_log_file_secure_append(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            out::print_warn(&format!("Failed to open log file {}: {}", path.display(), e));
            None
        }
    }
}

/// Initialize tracing. Returns the WorkerGuard of the file appender, if any;
/// it must be held until shutdown to flush logs.
pub fn init_tracing(lvl: LogLevel, log_file: Option<&Path>, json: bool) -> Result<Option<WorkerGuard>> {
    let env_filter = env_filter_from_level(lvl);
    let file = log_file.and_then(maybe_open_non_blocking_writer);
    let (writer, guard) = match file {
        Some((w, g)) => (Some(w), Some(g)),
        None => (None, None),
    };

    if json {
        let console_layer = tsfmt::layer()
            .event_format(tsfmt::format().json())
            .with_timer(LocalHumanTime)
            .with_target(true)
            .with_writer(std::io::stderr);
        let file_layer = writer.map(|w| {
            tsfmt::layer()
                .event_format(tsfmt::format().json())
                .with_timer(LocalHumanTime)
                .with_target(true)
                .with_thread_ids(true)
                .with_writer(w)
        });
        registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()?;
    } else {
        let console_layer = tsfmt::layer()
            .with_timer(LocalHumanTime)
            .with_target(true)
            .compact()
            .with_writer(std::io::stderr);
        let file_layer = writer.map(|w| {
            tsfmt::layer()
                .with_timer(LocalHumanTime)
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(false)
                .compact()
                .with_writer(w)
        });
        registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()?;
    }
    Ok(guard)
}
