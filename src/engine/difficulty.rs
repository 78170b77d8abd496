use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::kana::ParseError;

/// Remaining time at or below which the timer is shown as a warning.
pub const WARNING_THRESHOLD_SECS: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn to_key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    pub fn distractor_count(self) -> usize {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Medium => 7,
            Difficulty::Hard => 9,
        }
    }

    /// `None` means untimed.
    pub fn time_limit_secs(self) -> Option<u32> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(10),
            Difficulty::Hard => Some(7),
        }
    }

    pub fn is_timed(self) -> bool {
        self.time_limit_secs().is_some()
    }
}

pub fn is_warning(remaining_secs: u32) -> bool {
    remaining_secs <= WARNING_THRESHOLD_SECS
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_key())
    }
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::from_key(&s.trim().to_ascii_lowercase())
            .ok_or_else(|| ParseError::new("difficulty", s))
    }
}
