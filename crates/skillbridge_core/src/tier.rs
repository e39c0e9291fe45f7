//! Score tiers for match display.

use serde::{Deserialize, Serialize};

use crate::model::Match;

pub const HIGH_THRESHOLD: u8 = 80;
pub const MEDIUM_THRESHOLD: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Low,
    Medium,
    High,
}

impl ScoreTier {
    /// `>= 80` high, `>= 60` medium, anything else low.
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_THRESHOLD {
            ScoreTier::High
        } else if score >= MEDIUM_THRESHOLD {
            ScoreTier::Medium
        } else {
            ScoreTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreTier::High => "high",
            ScoreTier::Medium => "medium",
            ScoreTier::Low => "low",
        }
    }
}

impl std::fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Match {
    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_score(self.score)
    }

    /// Percentage badge text, e.g. `"85%"`.
    pub fn badge(&self) -> String {
        format!("{}%", self.score)
    }
}

/// Highest score first; equal scores keep server order.
pub fn sort_matches_by_score(matches: &mut [Match]) {
    matches.sort_by(|a, b| b.score.cmp(&a.score));
}
