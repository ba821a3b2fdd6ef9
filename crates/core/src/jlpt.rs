//! JLPT proficiency levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Japanese-Language Proficiency Test tier, `N1` (hardest) to `N5` (easiest).
///
/// Stored in the database as the lowercase label (`n1` .. `n5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JlptLevel {
    N1,
    N2,
    N3,
    N4,
    N5,
}

impl JlptLevel {
    pub const ALL: [JlptLevel; 5] = [
        JlptLevel::N1,
        JlptLevel::N2,
        JlptLevel::N3,
        JlptLevel::N4,
        JlptLevel::N5,
    ];

    /// Database / form label.
    pub fn as_str(self) -> &'static str {
        match self {
            JlptLevel::N1 => "n1",
            JlptLevel::N2 => "n2",
            JlptLevel::N3 => "n3",
            JlptLevel::N4 => "n4",
            JlptLevel::N5 => "n5",
        }
    }

    /// Label shown in rendered cards.
    pub fn display_label(self) -> &'static str {
        match self {
            JlptLevel::N1 => "N1",
            JlptLevel::N2 => "N2",
            JlptLevel::N3 => "N3",
            JlptLevel::N4 => "N4",
            JlptLevel::N5 => "N5",
        }
    }
}

impl FromStr for JlptLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        JlptLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid JLPT level '{s}'. Must be one of: n1, n2, n3, n4, n5"
                ))
            })
    }
}

impl TryFrom<String> for JlptLevel {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for JlptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_label())
    }
}
