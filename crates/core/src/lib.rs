//! # T-Flow Core
//!
//! Core triage logic for the T-Flow service.
//!
//! This crate contains the decision pipeline and its seams to the outside world:
//! - Rule-based keyword triage and vital-sign threshold flags (pure functions)
//! - AI classification over a [`CompletionProvider`] with a tolerant response parser
//! - Persistence over a [`RecordStore`] with typed records
//! - [`TriageService`], which ties them together with the AI to rule-based fallback
//!
//! **No API concerns**: HTTP servers, request DTOs and the concrete provider/store clients
//! belong in `api-rest`, `api-shared`, `tflow-groq` and `tflow-supabase`.

pub mod ai;
pub mod config;
pub mod constants;
pub mod error;
pub mod service;
pub mod stats;
pub mod store;
pub mod triage;
pub mod validation;
pub mod vitals;

pub use ai::{AiClassifier, CompletionProvider};
pub use config::CoreConfig;
pub use error::{ConfigError, LimitError, ProviderError, StoreError, VitalsError};
pub use service::{TriageOutcome, TriageService, VitalsOutcome};
pub use stats::TriageStats;
pub use store::{MemoryStore, PatientInfo, RecordStore, Table, TriageRecord, VitalsRecord};
pub use tflow_types::{SymptomText, TextError};
pub use triage::{rule_based_triage, TriageLevel};
pub use vitals::{evaluate_vitals, VitalsFlags, VitalsReading};
