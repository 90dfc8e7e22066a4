//! # API Shared
//!
//! Shared definitions for the T-Flow HTTP API.
//!
//! Contains:
//! - Request and response bodies (`dto` module), with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and by the `tflow` CLI for printing results in the same shape the API
//! returns them.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;

/// Human-readable service name reported by the banner and health endpoints.
pub const SERVICE_NAME: &str = "T-Flow AI Medical Triage API";

/// Service version reported by the banner and health endpoints.
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current time as an RFC 3339 string, used for response timestamps.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
