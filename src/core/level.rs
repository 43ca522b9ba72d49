//! Log level definitions
//!
//! Six canonical severities ordered by declaration rank. The legacy tokens
//! `warn` and `fatal` are accepted wherever a level is parsed and resolve to
//! `Warning` and `Critical`; they never appear in iteration or serialization.

use crate::core::error::MultilogError;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warning = 3,
    Error = 4,
    Critical = 5,
}

const ALL_LEVELS: [LogLevel; 6] = [
    LogLevel::Trace,
    LogLevel::Debug,
    LogLevel::Info,
    LogLevel::Warning,
    LogLevel::Error,
    LogLevel::Critical,
];

impl LogLevel {
    /// All canonical levels in rank order. Aliases are not members.
    pub const fn all() -> [LogLevel; 6] {
        ALL_LEVELS
    }

    /// Position in the declaration order, from `Trace` (0) to `Critical` (5).
    pub const fn rank(self) -> usize {
        self as usize
    }

    /// Canonical lowercase value, as used in payload serialization.
    pub const fn to_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
        }
    }

    pub fn color_code(self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Trace => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warning => Yellow,
            LogLevel::Error => Red,
            LogLevel::Critical => BrightRed,
        }
    }

    /// Canonical levels whose rank falls within `bounds`, in rank order.
    ///
    /// Unbounded ends default to `Trace` and `Critical`. A range whose start
    /// ranks above its end yields an empty vec rather than an error:
    ///
    /// ```
    /// use multilog::LogLevel;
    ///
    /// assert_eq!(
    ///     LogLevel::range(LogLevel::Warning..),
    ///     vec![LogLevel::Warning, LogLevel::Error, LogLevel::Critical],
    /// );
    /// assert!(LogLevel::range(LogLevel::Critical..=LogLevel::Trace).is_empty());
    /// ```
    pub fn range(bounds: impl RangeBounds<LogLevel>) -> Vec<LogLevel> {
        let start = match bounds.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(level) => level.rank(),
            Bound::Excluded(level) => level.rank() + 1,
        };
        let end = match bounds.end_bound() {
            Bound::Unbounded => ALL_LEVELS.len() - 1,
            Bound::Included(level) => level.rank(),
            Bound::Excluded(level) => match level.rank().checked_sub(1) {
                Some(end) => end,
                None => return Vec::new(),
            },
        };
        if start > end {
            return Vec::new();
        }
        ALL_LEVELS[start..=end].to_vec()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = MultilogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "critical" | "fatal" => Ok(LogLevel::Critical),
            _ => Err(MultilogError::UnknownLevel(s.to_string())),
        }
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_ordering_holds_per_pair() {
        for a in LogLevel::all() {
            for b in LogLevel::all() {
                let relations =
                    [a < b, a == b, a > b].iter().filter(|&&r| r).count();
                assert_eq!(relations, 1, "{a} vs {b}");
                assert_eq!(a < b, a.rank() < b.rank());
            }
        }
    }

    #[test]
    fn test_declaration_order() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Critical);
    }

    #[test]
    fn test_all_has_six_members_in_rank_order() {
        let all = LogLevel::all();
        assert_eq!(all.len(), 6);
        for (rank, level) in all.iter().enumerate() {
            assert_eq!(level.rank(), rank);
        }
    }

    #[test]
    fn test_aliases_resolve_to_canonical() {
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("fatal".parse::<LogLevel>().unwrap(), LogLevel::Critical);
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("Fatal".parse::<LogLevel>().unwrap(), LogLevel::Critical);
    }

    #[test]
    fn test_alias_resolution_is_idempotent() {
        let resolved = "warn".parse::<LogLevel>().unwrap();
        let twice = resolved.to_str().parse::<LogLevel>().unwrap();
        assert_eq!(resolved, twice);
        assert_eq!(twice, LogLevel::Warning);
    }

    #[test]
    fn test_canonical_tokens_parse_case_insensitively() {
        for level in LogLevel::all() {
            assert_eq!(level.to_str().parse::<LogLevel>().unwrap(), level);
            assert_eq!(
                level.to_str().to_uppercase().parse::<LogLevel>().unwrap(),
                level
            );
        }
    }

    #[test]
    fn test_unknown_token_is_an_error() {
        let err = "verbose".parse::<LogLevel>().unwrap_err();
        assert!(matches!(err, MultilogError::UnknownLevel(token) if token == "verbose"));
        assert!("".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_range_full() {
        assert_eq!(LogLevel::range(..), LogLevel::all().to_vec());
    }

    #[test]
    fn test_range_middle() {
        assert_eq!(
            LogLevel::range(LogLevel::Info..=LogLevel::Critical),
            vec![
                LogLevel::Info,
                LogLevel::Warning,
                LogLevel::Error,
                LogLevel::Critical,
            ],
        );
    }

    #[test]
    fn test_range_open_ends() {
        assert_eq!(
            LogLevel::range(LogLevel::Error..),
            vec![LogLevel::Error, LogLevel::Critical],
        );
        assert_eq!(
            LogLevel::range(..=LogLevel::Info),
            vec![LogLevel::Trace, LogLevel::Debug, LogLevel::Info],
        );
    }

    #[test]
    fn test_range_single_member() {
        assert_eq!(
            LogLevel::range(LogLevel::Warning..=LogLevel::Warning),
            vec![LogLevel::Warning],
        );
    }

    #[test]
    fn test_range_inverted_is_empty() {
        for a in LogLevel::all() {
            for b in LogLevel::all() {
                let range = LogLevel::range(a..=b);
                if a.rank() > b.rank() {
                    assert!(range.is_empty(), "{a}..={b}");
                } else {
                    assert_eq!(range.len(), b.rank() - a.rank() + 1);
                }
            }
        }
    }

    #[test]
    fn test_range_exclusive_end() {
        assert_eq!(
            LogLevel::range(LogLevel::Trace..LogLevel::Info),
            vec![LogLevel::Trace, LogLevel::Debug],
        );
        assert!(LogLevel::range(LogLevel::Trace..LogLevel::Trace).is_empty());
    }

    #[test]
    fn test_serialize_emits_canonical_lowercase() {
        let json = serde_json::to_string(&LogLevel::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        let json = serde_json::to_string(&LogLevel::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }

    #[test]
    fn test_deserialize_accepts_aliases() {
        let level: LogLevel = serde_json::from_str("\"warn\"").unwrap();
        assert_eq!(level, LogLevel::Warning);
        let level: LogLevel = serde_json::from_str("\"fatal\"").unwrap();
        assert_eq!(level, LogLevel::Critical);
        assert!(serde_json::from_str::<LogLevel>("\"loud\"").is_err());
    }

    #[test]
    fn test_serde_roundtrip_all_levels() {
        for level in LogLevel::all() {
            let json = serde_json::to_string(&level).unwrap();
            let back: LogLevel = serde_json::from_str(&json).unwrap();
            assert_eq!(level, back);
        }
    }

    #[test]
    fn test_display_matches_canonical_value() {
        assert_eq!(LogLevel::Warning.to_string(), "warning");
        assert_eq!(format!("{}", LogLevel::Trace), "trace");
    }
}
