//! Usage statistics over recent records.

use crate::store::{TriageRecord, VitalsRecord};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageSummary {
    pub total_assessments: usize,
    /// Count per stored label, including labels that are not one of the four levels; labels with
    /// no records are omitted.
    pub levels_breakdown: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalsSummary {
    pub total_checks: usize,
    pub flagged_cases: usize,
    /// Share of checks with any flag set, as a percentage rounded to two decimals.
    pub flag_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageStats {
    pub triage: TriageSummary,
    pub vitals: VitalsSummary,
}

/// Counts triage labels and flagged vitals.
pub fn summarise(triage: &[TriageRecord], vitals: &[VitalsRecord]) -> TriageStats {
    let mut levels_breakdown = BTreeMap::new();
    for record in triage {
        *levels_breakdown
            .entry(record.triage_level.clone())
            .or_insert(0) += 1;
    }

    let flagged_cases = vitals.iter().filter(|r| r.any_flag).count();

    TriageStats {
        triage: TriageSummary {
            total_assessments: triage.len(),
            levels_breakdown,
        },
        vitals: VitalsSummary {
            total_checks: vitals.len(),
            flagged_cases,
            flag_percentage: percentage(flagged_cases, vitals.len()),
        },
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = part as f64 / whole as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}
