use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of operating systems the classifier can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsCategory {
    Android,
    Ios,
    Ipados,
    Macos,
    Windows,
    Linux,
}

impl OsCategory {
    /// Canonical enumeration order. Ranking and tie fallback both use it,
    /// so a tied winner is always the same category for the same input.
    pub const ALL: [OsCategory; 6] = [
        OsCategory::Android,
        OsCategory::Ios,
        OsCategory::Ipados,
        OsCategory::Macos,
        OsCategory::Windows,
        OsCategory::Linux,
    ];

    /// Stable index into score arrays.
    pub(crate) fn index(self) -> usize {
        match self {
            OsCategory::Android => 0,
            OsCategory::Ios => 1,
            OsCategory::Ipados => 2,
            OsCategory::Macos => 3,
            OsCategory::Windows => 4,
            OsCategory::Linux => 5,
        }
    }

    /// Lowercase wire name, matching the serialized form.
    pub fn key(self) -> &'static str {
        match self {
            OsCategory::Android => "android",
            OsCategory::Ios => "ios",
            OsCategory::Ipados => "ipados",
            OsCategory::Macos => "macos",
            OsCategory::Windows => "windows",
            OsCategory::Linux => "linux",
        }
    }

    /// Human-readable name for summaries and score rows.
    pub fn pretty(self) -> &'static str {
        match self {
            OsCategory::Android => "Android",
            OsCategory::Ios => "iOS",
            OsCategory::Ipados => "iPadOS",
            OsCategory::Macos => "macOS",
            OsCategory::Windows => "Windows",
            OsCategory::Linux => "Linux",
        }
    }
}

impl fmt::Display for OsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pretty())
    }
}
