//! Error types for the core crate.
//!
//! Provider and store failures are plain values rather than panics or opaque boxes so that the
//! orchestrator can branch on them: an AI failure selects the rule-based path, a store failure
//! becomes an error marker on an otherwise successful result.

/// Failure of the external text-completion provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request timed out")]
    Timeout,
    #[error("could not connect to provider: {0}")]
    ConnectionFailed(String),
    #[error("provider returned an unusable response: {0}")]
    InvalidResponse(String),
    #[error("provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("provider client misconfigured: {0}")]
    Config(String),
}

/// Failure of the external record store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store request timed out")]
    Timeout,
    #[error("could not connect to store: {0}")]
    ConnectionFailed(String),
    #[error("store returned an unusable response: {0}")]
    InvalidResponse(String),
    #[error("store returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to serialise record: {0}")]
    Serialization(String),
    #[error("store client misconfigured: {0}")]
    Config(String),
}

/// Missing or malformed startup configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// A vital-sign reading that is outside the accepted ranges.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VitalsError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i32,
        max: i32,
        value: i32,
    },
    #[error("Diastolic BP must be lower than systolic BP")]
    DiastolicNotBelowSystolic,
}

/// A recent-record limit outside `1..=MAX_RECENT_LIMIT`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Limit must be between 1 and {max}")]
pub struct LimitError {
    pub max: usize,
}
