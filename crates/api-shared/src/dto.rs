//! Request and response bodies.
//!
//! Field names follow the public JSON contract, including the camel-cased `systolicBP` and
//! `diastolicBP` on vitals requests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tflow_core::stats::{TriageSummary, VitalsSummary};
use tflow_core::{
    PatientInfo, TriageOutcome, TriageRecord, TriageStats, VitalsFlags, VitalsOutcome,
    VitalsRecord,
};
use utoipa::ToSchema;

fn default_use_ai() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TriageReq {
    /// Free-text symptom description, 5 to 2000 characters.
    #[schema(example = "crushing chest pain radiating to the left arm")]
    pub symptoms: String,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub patient_info: Option<PatientInfo>,
    /// Use the language model; when false, or when the model fails, keyword rules are used.
    #[serde(default = "default_use_ai")]
    pub use_ai: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TriageRes {
    #[schema(example = "Critical")]
    pub triage_level: String,
    pub record_id: Option<String>,
    pub timestamp: String,
    /// Present when the result could not be stored.
    pub error: Option<String>,
}

impl From<TriageOutcome> for TriageRes {
    fn from(outcome: TriageOutcome) -> Self {
        Self {
            triage_level: outcome.triage_level.to_string(),
            record_id: outcome.record_id,
            timestamp: outcome.timestamp,
            error: outcome.error,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VitalsReq {
    /// Beats per minute, 30 to 250.
    pub pulse: i32,
    /// mmHg, 60 to 300.
    #[serde(rename = "systolicBP")]
    pub systolic_bp: i32,
    /// mmHg, 30 to 200, and below systolic.
    #[serde(rename = "diastolicBP")]
    pub diastolic_bp: i32,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub patient_info: Option<PatientInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VitalsFlagsRes {
    pub pulse_flag: bool,
    pub systolic_flag: bool,
    pub diastolic_flag: bool,
    pub any_flag: bool,
}

impl From<VitalsFlags> for VitalsFlagsRes {
    fn from(flags: VitalsFlags) -> Self {
        Self {
            pulse_flag: flags.pulse_flag(),
            systolic_flag: flags.systolic_flag(),
            diastolic_flag: flags.diastolic_flag(),
            any_flag: flags.any_flag(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VitalsRes {
    pub flags: VitalsFlagsRes,
    pub record_id: Option<String>,
    pub timestamp: String,
    pub error: Option<String>,
}

impl From<VitalsOutcome> for VitalsRes {
    fn from(outcome: VitalsOutcome) -> Self {
        Self {
            flags: outcome.flags.into(),
            record_id: outcome.record_id,
            timestamp: outcome.timestamp,
            error: outcome.error,
        }
    }
}

/// A stored triage assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TriageRecordRes {
    pub id: String,
    pub created_at: String,
    pub symptoms: String,
    pub triage_level: String,
    #[schema(value_type = Object)]
    pub patient_info: PatientInfo,
    pub use_ai: bool,
}

impl From<TriageRecord> for TriageRecordRes {
    fn from(record: TriageRecord) -> Self {
        Self {
            id: record.id,
            created_at: record.created_at,
            symptoms: record.symptoms,
            triage_level: record.triage_level,
            patient_info: record.patient_info,
            use_ai: record.use_ai,
        }
    }
}

/// A stored vitals check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VitalsRecordRes {
    pub id: String,
    pub created_at: String,
    pub pulse: i32,
    pub systolic_bp: i32,
    pub diastolic_bp: i32,
    pub pulse_flag: bool,
    pub systolic_flag: bool,
    pub diastolic_flag: bool,
    pub any_flag: bool,
    #[schema(value_type = Object)]
    pub patient_info: PatientInfo,
}

impl From<VitalsRecord> for VitalsRecordRes {
    fn from(record: VitalsRecord) -> Self {
        Self {
            id: record.id,
            created_at: record.created_at,
            pulse: record.pulse,
            systolic_bp: record.systolic_bp,
            diastolic_bp: record.diastolic_bp,
            pulse_flag: record.pulse_flag,
            systolic_flag: record.systolic_flag,
            diastolic_flag: record.diastolic_flag,
            any_flag: record.any_flag,
            patient_info: record.patient_info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecentTriageRes {
    pub records: Vec<TriageRecordRes>,
    pub count: usize,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecentVitalsRes {
    pub records: Vec<VitalsRecordRes>,
    pub count: usize,
    pub timestamp: String,
}

impl RecentTriageRes {
    pub fn new(records: Vec<TriageRecord>, timestamp: String) -> Self {
        let records: Vec<TriageRecordRes> = records.into_iter().map(Into::into).collect();
        Self {
            count: records.len(),
            records,
            timestamp,
        }
    }
}

impl RecentVitalsRes {
    pub fn new(records: Vec<VitalsRecord>, timestamp: String) -> Self {
        let records: Vec<VitalsRecordRes> = records.into_iter().map(Into::into).collect();
        Self {
            count: records.len(),
            records,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TriageStatsRes {
    pub total_assessments: usize,
    pub levels_breakdown: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VitalsStatsRes {
    pub total_checks: usize,
    pub flagged_cases: usize,
    pub flag_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatsRes {
    pub triage_stats: TriageStatsRes,
    pub vitals_stats: VitalsStatsRes,
    pub timestamp: String,
}

impl StatsRes {
    pub fn new(stats: TriageStats, timestamp: String) -> Self {
        let TriageStats { triage, vitals } = stats;
        let TriageSummary {
            total_assessments,
            levels_breakdown,
        } = triage;
        let VitalsSummary {
            total_checks,
            flagged_cases,
            flag_percentage,
        } = vitals;

        Self {
            triage_stats: TriageStatsRes {
                total_assessments,
                levels_breakdown,
            },
            vitals_stats: VitalsStatsRes {
                total_checks,
                flagged_cases,
                flag_percentage,
            },
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RootRes {
    pub message: String,
    pub version: String,
    pub docs: String,
    pub health: String,
}

/// Error body returned for 4xx and 5xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub detail: String,
}
