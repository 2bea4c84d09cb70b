//! Environment variable utilities
//!
//! Typed lookups with defaults, used by `PoolConfig::from_env()`.
//!
//! ```ignore
//! use flexpool_core::env::{env_get, env_get_bool, env_get_opt};
//!
//! let max: usize = env_get("FLEXPOOL_MAX_THREADS", 10);
//! let stack: Option<usize> = env_get_opt("FLEXPOOL_STACK_SIZE");
//! let flush = env_get_bool("FLEXPOOL_FLUSH_EPRINT", false);
//! ```

use std::str::FromStr;

/// Parse `key` as `T`, or return `default` when unset or unparsable
#[inline]
pub fn env_get<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    env_get_opt(key).unwrap_or(default)
}

/// Parse `key` as `T`, `None` when unset or unparsable
#[inline]
pub fn env_get_opt<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    parse_opt(std::env::var(key).ok())
}

/// Parse an already looked-up raw value, `None` when absent or unparsable
///
/// Lets callers resolve keys through their own lookup (a map in tests)
/// with the same trimming rules as the env getters.
#[inline]
pub fn parse_opt<T>(raw: Option<String>) -> Option<T>
where
    T: FromStr,
{
    raw.and_then(|v| v.trim().parse().ok())
}

/// Read `key` as a boolean flag
///
/// "1", "true", "yes", "on" (any case) are true; any other set value is
/// false. Unset returns `default`.
#[inline]
pub fn env_get_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => parse_flag(&val),
        Err(_) => default,
    }
}

#[inline]
pub(crate) fn parse_flag(val: &str) -> bool {
    matches!(
        val.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_returns_default() {
        let val: usize = env_get("__FLEXPOOL_TEST_UNSET__", 42);
        assert_eq!(val, 42);
        let val: Option<u64> = env_get_opt("__FLEXPOOL_TEST_UNSET__");
        assert!(val.is_none());
        assert!(env_get_bool("__FLEXPOOL_TEST_UNSET__", true));
    }

    #[test]
    fn test_parse_and_fallback() {
        assert_eq!(parse_opt::<usize>(Some(" 17 ".to_string())), Some(17));
        assert_eq!(parse_opt::<usize>(Some("seventeen".to_string())), None);
        assert_eq!(parse_opt::<usize>(None), None);
        assert_eq!(parse_opt::<u64>(Some("-1".to_string())), None);
    }

    #[test]
    fn test_flag_variants() {
        for yes in ["1", "true", "TRUE", "yes", "On"] {
            assert!(parse_flag(yes), "{} should be true", yes);
        }
        for no in ["0", "false", "off", "garbage", ""] {
            assert!(!parse_flag(no), "{} should be false", no);
        }
    }
}
