//! Triage levels and the rule-based classifier.

use crate::constants::{DEFAULT_TRIAGE_LEVEL, TRIAGE_KEYWORDS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Urgency assigned to a symptom report.
///
/// Ordering follows urgency: `Critical` compares greatest, `Low` least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriageLevel {
    Critical,
    Urgent,
    Moderate,
    Low,
}

impl TriageLevel {
    /// All levels, most urgent first.
    pub const ALL: [TriageLevel; 4] = [
        TriageLevel::Critical,
        TriageLevel::Urgent,
        TriageLevel::Moderate,
        TriageLevel::Low,
    ];

    /// The capitalised label, as stored and returned over the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            TriageLevel::Critical => "Critical",
            TriageLevel::Urgent => "Urgent",
            TriageLevel::Moderate => "Moderate",
            TriageLevel::Low => "Low",
        }
    }

    fn urgency(&self) -> u8 {
        match self {
            TriageLevel::Critical => 3,
            TriageLevel::Urgent => 2,
            TriageLevel::Moderate => 1,
            TriageLevel::Low => 0,
        }
    }
}

impl Ord for TriageLevel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.urgency().cmp(&other.urgency())
    }
}

impl PartialOrd for TriageLevel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the four labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown triage level: {0}")]
pub struct UnknownTriageLevel(pub String);

impl FromStr for TriageLevel {
    type Err = UnknownTriageLevel;

    /// Case-insensitive, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TriageLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownTriageLevel(trimmed.to_string()))
    }
}

/// Classifies symptom text by keyword search.
///
/// Keyword groups are checked most urgent first, so a description mentioning both a critical and
/// a low-urgency keyword is critical. Text with no known keyword is `Moderate`.
pub fn rule_based_triage(symptoms: &str) -> TriageLevel {
    let text = symptoms.to_lowercase();

    TRIAGE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(level, _)| *level)
        .unwrap_or(DEFAULT_TRIAGE_LEVEL)
}
