//! Constants used throughout the T-Flow core crate.
//!
//! Clinical thresholds and keyword lists are fixed configuration. They are kept here, in one
//! place, so that the classifiers and evaluators read from the same source.

use crate::triage::TriageLevel;

/// Pulse below this value (beats per minute) is flagged.
pub const PULSE_LOW: i32 = 60;
/// Pulse above this value (beats per minute) is flagged.
pub const PULSE_HIGH: i32 = 100;

/// Systolic pressure below this value (mmHg) is flagged.
pub const SYSTOLIC_LOW: i32 = 90;
/// Systolic pressure above this value (mmHg) is flagged.
pub const SYSTOLIC_HIGH: i32 = 160;

/// Diastolic pressure below this value (mmHg) is flagged.
pub const DIASTOLIC_LOW: i32 = 60;
/// Diastolic pressure above this value (mmHg) is flagged.
pub const DIASTOLIC_HIGH: i32 = 100;

/// Accepted pulse range for a reading (inclusive).
pub const PULSE_RANGE: (i32, i32) = (30, 250);
/// Accepted systolic range for a reading (inclusive).
pub const SYSTOLIC_RANGE: (i32, i32) = (60, 300);
/// Accepted diastolic range for a reading (inclusive).
pub const DIASTOLIC_RANGE: (i32, i32) = (30, 200);

/// Keyword groups for the rule-based classifier, in priority order.
pub const TRIAGE_KEYWORDS: [(TriageLevel, &[&str]); 4] = [
    (
        TriageLevel::Critical,
        &["seizure", "loss of consciousness", "coma"],
    ),
    (
        TriageLevel::Urgent,
        &["vomiting", "blurred vision", "slurred speech"],
    ),
    (TriageLevel::Moderate, &["headache", "neck pain"]),
    (TriageLevel::Low, &["dizziness", "mild pain", "tiredness"]),
];

/// Level returned when no keyword matches.
pub const DEFAULT_TRIAGE_LEVEL: TriageLevel = TriageLevel::Moderate;

/// Table holding triage records.
pub const TRIAGE_TABLE: &str = "triage";
/// Table holding vital-sign records.
pub const VITALS_TABLE: &str = "vitals";

/// Default number of records returned by recent-record listings.
pub const DEFAULT_RECENT_LIMIT: usize = 10;
/// Largest number of records a recent-record listing may request.
pub const MAX_RECENT_LIMIT: usize = 100;
/// Number of recent records of each kind that statistics are computed over.
pub const STATS_WINDOW: usize = 100;

/// Error marker attached to results that could not be persisted.
pub const STORE_FAILURE_MARKER: &str = "Failed to store in database";

/// Default chat-completions model.
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
/// Default OpenAI-compatible base URL for the Groq API.
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
/// Sampling temperature sent with every classification request.
pub const GROQ_TEMPERATURE: f32 = 0.1;
/// Default timeout for outbound HTTP calls, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
