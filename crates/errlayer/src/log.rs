//! Leveled stderr logging
//!
//! Thread-safe, optionally-flushing diagnostics for the raise/catch path.
//! Quiet by default: only warnings and errors are shown.
//!
//! # Environment Variables
//!
//! - `ERRLAYER_LOG_LEVEL=<level>` - off, error, warn, info, debug, trace (or 0..5)
//! - `ERRLAYER_FLUSH_EPRINT=1` - Flush stderr after each line
//!
//! ```
//! use errlayer::{set_log_level, LogLevel};
//!
//! // Print every raise to stderr
//! set_log_level(LogLevel::Trace);
//! ```

use std::io::Write;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::env::{env_get, env_get_bool};

pub const ENV_LOG_LEVEL: &str = "ERRLAYER_LOG_LEVEL";
pub const ENV_FLUSH_EPRINT: &str = "ERRLAYER_FLUSH_EPRINT";

/// Log levels
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => LogLevel::Off,
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Off => "",
            LogLevel::Error => "[errlayer ERROR]",
            LogLevel::Warn => "[errlayer WARN] ",
            LogLevel::Info => "[errlayer INFO] ",
            LogLevel::Debug => "[errlayer DEBUG]",
            LogLevel::Trace => "[errlayer TRACE]",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "0" => Ok(LogLevel::Off),
            "error" | "1" => Ok(LogLevel::Error),
            "warn" | "2" => Ok(LogLevel::Warn),
            "info" | "3" => Ok(LogLevel::Info),
            "debug" | "4" => Ok(LogLevel::Debug),
            "trace" | "5" => Ok(LogLevel::Trace),
            _ => Err(()),
        }
    }
}

static FLUSH_ENABLED: AtomicBool = AtomicBool::new(false);
static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Warn as u8);
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize from environment variables.
///
/// Runs lazily on first use; calling it explicitly only makes the moment
/// deterministic. Later calls are no-ops.
pub fn init() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }
    let level = env_get(ENV_LOG_LEVEL, LogLevel::Warn);
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
    FLUSH_ENABLED.store(env_get_bool(ENV_FLUSH_EPRINT, false), Ordering::Relaxed);
}

#[inline]
fn ensure_init() {
    if !INITIALIZED.load(Ordering::Relaxed) {
        init();
    }
}

/// Current log level
#[inline]
pub fn log_level() -> LogLevel {
    ensure_init();
    LogLevel::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Set log level programmatically. Overrides the environment.
pub fn set_log_level(level: LogLevel) {
    ensure_init();
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Set flush mode programmatically. Overrides the environment.
pub fn set_flush_enabled(enabled: bool) {
    ensure_init();
    FLUSH_ENABLED.store(enabled, Ordering::Relaxed);
}

#[inline]
pub fn level_enabled(level: LogLevel) -> bool {
    level != LogLevel::Off && level <= log_level()
}

#[doc(hidden)]
pub fn _log_impl(level: LogLevel, args: std::fmt::Arguments<'_>) {
    if !level_enabled(level) {
        return;
    }
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    let _ = write!(handle, "{} ", level.prefix());
    let _ = handle.write_fmt(args);
    let _ = handle.write_all(b"\n");
    if FLUSH_ENABLED.load(Ordering::Relaxed) {
        let _ = handle.flush();
    }
}

macro_rules! lwarn {
    ($($arg:tt)*) => {{
        $crate::log::_log_impl($crate::log::LogLevel::Warn, format_args!($($arg)*));
    }};
}

macro_rules! ldebug {
    ($($arg:tt)*) => {{
        $crate::log::_log_impl($crate::log::LogLevel::Debug, format_args!($($arg)*));
    }};
}

macro_rules! ltrace {
    ($($arg:tt)*) => {{
        $crate::log::_log_impl($crate::log::LogLevel::Trace, format_args!($($arg)*));
    }};
}
