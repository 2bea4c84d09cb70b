//! Kernel-style leveled logging for flexpool
//!
//! Lines go to stderr under the stderr lock, so concurrent workers never
//! interleave partial lines. Every line carries the emitting thread's name
//! and, on Linux, its kernel thread id:
//!
//! ```text
//! [INFO]  [flexpool-admin/41872] added worker 3, alive=4
//! ```
//!
//! # Environment Variables
//!
//! - `FLEXPOOL_LOG_LEVEL=<level>` - off, error, warn, info, debug, trace (or 0..5)
//! - `FLEXPOOL_FLUSH_EPRINT=1` - Flush stderr after each line
//!
//! # Usage
//!
//! ```ignore
//! use flexpool_core::{kinfo, kwarn};
//!
//! kinfo!("pool started with {} workers", n);
//! kwarn!("spawn failed: {}", err);
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Once;

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

    /// Parse a level name or digit; `None` for anything else
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "0" => Some(LogLevel::Off),
            "error" | "1" => Some(LogLevel::Error),
            "warn" | "2" => Some(LogLevel::Warn),
            "info" | "3" => Some(LogLevel::Info),
            "debug" | "4" => Some(LogLevel::Debug),
            "trace" | "5" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Off => "",
            LogLevel::Error => "[ERROR]",
            LogLevel::Warn => "[WARN] ",
            LogLevel::Info => "[INFO] ",
            LogLevel::Debug => "[DEBUG]",
            LogLevel::Trace => "[TRACE]",
        }
    }
}

static FLUSH_ENABLED: AtomicBool = AtomicBool::new(false);
static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);
static INIT: Once = Once::new();

/// Read `FLEXPOOL_LOG_LEVEL` and `FLEXPOOL_FLUSH_EPRINT`.
///
/// Runs once; called lazily by the first log line. Programmatic setters
/// called afterwards win.
pub fn init() {
    INIT.call_once(|| {
        if let Ok(val) = std::env::var("FLEXPOOL_FLUSH_EPRINT") {
            FLUSH_ENABLED.store(crate::env::parse_flag(&val), Ordering::Relaxed);
        }
        if let Ok(val) = std::env::var("FLEXPOOL_LOG_LEVEL") {
            let level = LogLevel::parse(&val).unwrap_or(LogLevel::Info);
            LOG_LEVEL.store(level as u8, Ordering::Relaxed);
        }
    });
}

#[inline]
pub fn flush_enabled() -> bool {
    init();
    FLUSH_ENABLED.load(Ordering::Relaxed)
}

#[inline]
pub fn log_level() -> LogLevel {
    init();
    LogLevel::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Set log level programmatically
pub fn set_log_level(level: LogLevel) {
    init();
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Set flush mode programmatically
pub fn set_flush_enabled(enabled: bool) {
    init();
    FLUSH_ENABLED.store(enabled, Ordering::Relaxed);
}

#[inline]
pub fn level_enabled(level: LogLevel) -> bool {
    level != LogLevel::Off && level <= log_level()
}

/// Kernel thread id of the caller, where the platform has one
pub fn os_thread_id() -> Option<u64> {
    cfg_if::cfg_if! {
        if #[cfg(target_os = "linux")] {
            // Safety: gettid takes no arguments and cannot fail
            let tid = unsafe { libc::syscall(libc::SYS_gettid) };
            Some(tid as u64)
        } else {
            None
        }
    }
}

fn write_thread_tag(out: &mut impl Write) {
    let current = std::thread::current();
    let name = current.name().unwrap_or("unnamed");
    let _ = match os_thread_id() {
        Some(tid) => write!(out, "[{}/{}] ", name, tid),
        None => write!(out, "[{}] ", name),
    };
}

/// Internal: leveled print
#[doc(hidden)]
pub fn _klog_impl(level: LogLevel, args: std::fmt::Arguments<'_>) {
    if !level_enabled(level) {
        return;
    }
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    let _ = write!(handle, "{} ", level.prefix());
    write_thread_tag(&mut handle);
    let _ = handle.write_fmt(args);
    let _ = handle.write_all(b"\n");
    if flush_enabled() {
        let _ = handle.flush();
    }
}

// ============================================================================
// Public Macros
// ============================================================================

/// Error level log (shown unless logging is off)
#[macro_export]
macro_rules! kerror {
    ($($arg:tt)*) => {{
        $crate::kprint::_klog_impl(
            $crate::kprint::LogLevel::Error,
            format_args!($($arg)*)
        );
    }};
}

/// Warning level log
#[macro_export]
macro_rules! kwarn {
    ($($arg:tt)*) => {{
        $crate::kprint::_klog_impl(
            $crate::kprint::LogLevel::Warn,
            format_args!($($arg)*)
        );
    }};
}

/// Info level log
#[macro_export]
macro_rules! kinfo {
    ($($arg:tt)*) => {{
        $crate::kprint::_klog_impl(
            $crate::kprint::LogLevel::Info,
            format_args!($($arg)*)
        );
    }};
}

/// Debug level log
#[macro_export]
macro_rules! kdebug {
    ($($arg:tt)*) => {{
        $crate::kprint::_klog_impl(
            $crate::kprint::LogLevel::Debug,
            format_args!($($arg)*)
        );
    }};
}

/// Trace level log (most verbose)
#[macro_export]
macro_rules! ktrace {
    ($($arg:tt)*) => {{
        $crate::kprint::_klog_impl(
            $crate::kprint::LogLevel::Trace,
            format_args!($($arg)*)
        );
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_levels_ordered() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Trace);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse(" 2 "), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("loud"), None);
        assert_eq!(LogLevel::from_u8(99), LogLevel::Trace);
    }

    #[test]
    fn test_thread_tag() {
        let mut buf = Vec::new();
        std::thread::Builder::new()
            .name("tag-probe".into())
            .spawn(move || {
                write_thread_tag(&mut buf);
                String::from_utf8(buf).unwrap()
            })
            .unwrap()
            .join()
            .map(|tag| assert!(tag.starts_with("[tag-probe")))
            .unwrap();
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_os_thread_id_differs_across_threads() {
        let here = os_thread_id().unwrap();
        let there = std::thread::spawn(os_thread_id).join().unwrap().unwrap();
        assert_ne!(here, there);
    }

    #[test]
    fn test_macros_compile() {
        assert!(!level_enabled(LogLevel::Off));
        kerror!("error {}", "msg");
        kwarn!("warn");
        ktrace!("trace {}", 1);
    }
}
