//! Triage orchestration.
//!
//! [`TriageService`] composes the classifiers, the vitals evaluator and persistence. It is the
//! only type the API and CLI layers need to hold.

use crate::ai::{AiClassifier, CompletionProvider};
use crate::constants::{STATS_WINDOW, STORE_FAILURE_MARKER};
use crate::stats::{summarise, TriageStats};
use crate::store::{
    InsertReceipt, NewTriageRecord, NewVitalsRecord, PatientInfo, Persistence, RecordStore,
    TriageRecord, VitalsRecord,
};
use crate::triage::{rule_based_triage, TriageLevel};
use crate::vitals::{evaluate_vitals, VitalsFlags, VitalsReading};
use crate::StoreError;
use std::sync::Arc;
use tflow_types::SymptomText;

/// Result of triaging a symptom report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageOutcome {
    pub triage_level: TriageLevel,
    /// Store-assigned identifier; absent if persistence failed.
    pub record_id: Option<String>,
    /// ISO-8601 timestamp from the store, or the current time if persistence failed.
    pub timestamp: String,
    /// Set when the result could not be persisted.
    pub error: Option<String>,
}

/// Result of evaluating a vitals reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VitalsOutcome {
    pub flags: VitalsFlags,
    pub record_id: Option<String>,
    pub timestamp: String,
    pub error: Option<String>,
}

/// Identifier, timestamp and error marker shared by both outcome types.
struct Persisted {
    record_id: Option<String>,
    timestamp: String,
    error: Option<String>,
}

impl From<Result<InsertReceipt, StoreError>> for Persisted {
    fn from(result: Result<InsertReceipt, StoreError>) -> Self {
        match result {
            Ok(receipt) => Self {
                record_id: Some(receipt.id),
                timestamp: receipt.created_at,
                error: None,
            },
            Err(_) => Self {
                record_id: None,
                timestamp: chrono::Utc::now().to_rfc3339(),
                error: Some(STORE_FAILURE_MARKER.to_string()),
            },
        }
    }
}

/// Triage operations over injected provider and store clients.
#[derive(Clone)]
pub struct TriageService {
    ai: AiClassifier,
    persistence: Persistence,
}

impl TriageService {
    pub fn new(provider: Arc<dyn CompletionProvider>, store: Arc<dyn RecordStore>) -> Self {
        Self {
            ai: AiClassifier::new(provider),
            persistence: Persistence::new(store),
        }
    }

    /// Classifies a symptom report and stores the result.
    ///
    /// With `use_ai`, the AI classifier is tried first and any failure falls back to the
    /// rule-based classifier. Neither a provider nor a store failure is returned to the caller:
    /// the former is logged, the latter is reported through `TriageOutcome::error`.
    pub async fn triage_patient(
        &self,
        symptoms: &SymptomText,
        patient_info: PatientInfo,
        use_ai: bool,
    ) -> TriageOutcome {
        let triage_level = self.classify(symptoms.as_str(), use_ai).await;

        let persisted: Persisted = self
            .persistence
            .store_triage(&NewTriageRecord {
                symptoms: symptoms.as_str(),
                triage_level,
                patient_info: &patient_info,
                use_ai,
            })
            .await
            .into();

        TriageOutcome {
            triage_level,
            record_id: persisted.record_id,
            timestamp: persisted.timestamp,
            error: persisted.error,
        }
    }

    /// Flags a vitals reading and stores the result.
    pub async fn flag_vitals(
        &self,
        reading: &VitalsReading,
        patient_info: PatientInfo,
    ) -> VitalsOutcome {
        let flags = evaluate_vitals(reading);

        let persisted: Persisted = self
            .persistence
            .store_vitals(&NewVitalsRecord {
                pulse: reading.pulse(),
                systolic_bp: reading.systolic(),
                diastolic_bp: reading.diastolic(),
                pulse_flag: flags.pulse_flag(),
                systolic_flag: flags.systolic_flag(),
                diastolic_flag: flags.diastolic_flag(),
                any_flag: flags.any_flag(),
                patient_info: &patient_info,
            })
            .await
            .into();

        VitalsOutcome {
            flags,
            record_id: persisted.record_id,
            timestamp: persisted.timestamp,
            error: persisted.error,
        }
    }

    /// Most recent triage records, newest first.
    pub async fn recent_triage(&self, limit: usize) -> Vec<TriageRecord> {
        self.persistence.recent_triage(limit).await
    }

    /// Most recent vitals records, newest first.
    pub async fn recent_vitals(&self, limit: usize) -> Vec<VitalsRecord> {
        self.persistence.recent_vitals(limit).await
    }

    /// Summary statistics over the most recent records of each kind.
    pub async fn stats(&self) -> TriageStats {
        let triage = self.persistence.recent_triage(STATS_WINDOW).await;
        let vitals = self.persistence.recent_vitals(STATS_WINDOW).await;
        summarise(&triage, &vitals)
    }

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns the `StoreError` raised by a minimal query.
    pub async fn probe_store(&self) -> Result<(), StoreError> {
        self.persistence.probe().await
    }

    async fn classify(&self, symptoms: &str, use_ai: bool) -> TriageLevel {
        if !use_ai {
            return rule_based_triage(symptoms);
        }

        match self.ai.classify(symptoms).await {
            Ok(level) => level,
            Err(e) => {
                tracing::warn!(error = %e, "AI triage failed, using rule-based fallback");
                rule_based_triage(symptoms)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::store::{MemoryStore, Table};
    use async_trait::async_trait;

    struct FailingProvider(ProviderError);

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn complete(&self, _: &str, _: &str) -> Result<String, ProviderError> {
            Err(self.0.clone())
        }
    }

    struct FixedProvider(&'static str);

    #[async_trait]
    impl CompletionProvider for FixedProvider {
        async fn complete(&self, _: &str, _: &str) -> Result<String, ProviderError> {
            Ok(self.0.to_string())
        }
    }

    struct UnreachableStore;

    #[async_trait]
    impl RecordStore for UnreachableStore {
        async fn insert(
            &self,
            _: Table,
            _: serde_json::Value,
        ) -> Result<InsertReceipt, StoreError> {
            Err(StoreError::ConnectionFailed("connection refused".into()))
        }

        async fn select_recent(
            &self,
            _: Table,
            _: usize,
        ) -> Result<Vec<serde_json::Value>, StoreError> {
            Err(StoreError::ConnectionFailed("connection refused".into()))
        }
    }

    fn symptoms(text: &str) -> SymptomText {
        SymptomText::new(text).unwrap()
    }

    #[tokio::test]
    async fn ai_failure_falls_back_to_rules() {
        let service = TriageService::new(
            Arc::new(FailingProvider(ProviderError::Timeout)),
            Arc::new(MemoryStore::new()),
        );

        let outcome = service
            .triage_patient(&symptoms("mild headache"), PatientInfo::new(), true)
            .await;

        assert_eq!(outcome.triage_level, rule_based_triage("mild headache"));
        assert_eq!(outcome.triage_level, TriageLevel::Moderate);
        assert!(outcome.record_id.is_some());
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn ai_answer_is_used_when_available() {
        let service = TriageService::new(
            Arc::new(FixedProvider("Urgent")),
            Arc::new(MemoryStore::new()),
        );

        let outcome = service
            .triage_patient(&symptoms("mild headache"), PatientInfo::new(), true)
            .await;
        assert_eq!(outcome.triage_level, TriageLevel::Urgent);
    }

    #[tokio::test]
    async fn rules_only_when_ai_disabled() {
        let service = TriageService::new(
            Arc::new(FixedProvider("Low")),
            Arc::new(MemoryStore::new()),
        );

        let outcome = service
            .triage_patient(&symptoms("seizure and tiredness"), PatientInfo::new(), false)
            .await;
        assert_eq!(outcome.triage_level, TriageLevel::Critical);
    }

    #[tokio::test]
    async fn triage_is_persisted_with_inputs() {
        let store = MemoryStore::new();
        let service = TriageService::new(
            Arc::new(FixedProvider("Critical")),
            Arc::new(store.clone()),
        );
        let mut info = PatientInfo::new();
        info.insert("age".into(), 45.into());

        let outcome = service
            .triage_patient(&symptoms("crushing chest pain"), info.clone(), true)
            .await;

        let records = service.recent_triage(10).await;
        assert_eq!(store.len(Table::Triage), 1);
        assert_eq!(records[0].id, outcome.record_id.unwrap());
        assert_eq!(records[0].created_at, outcome.timestamp);
        assert_eq!(records[0].symptoms, "crushing chest pain");
        assert_eq!(records[0].patient_info, info);
        assert!(records[0].use_ai);
    }

    #[tokio::test]
    async fn store_failure_keeps_label_and_sets_error() {
        let service = TriageService::new(
            Arc::new(FailingProvider(ProviderError::ConnectionFailed("dns".into()))),
            Arc::new(UnreachableStore),
        );

        let outcome = service
            .triage_patient(&symptoms("vomiting all night"), PatientInfo::new(), true)
            .await;

        assert_eq!(outcome.triage_level, TriageLevel::Urgent);
        assert_eq!(outcome.record_id, None);
        assert_eq!(outcome.error.as_deref(), Some(STORE_FAILURE_MARKER));
        assert!(chrono::DateTime::parse_from_rfc3339(&outcome.timestamp).is_ok());
    }

    #[tokio::test]
    async fn vitals_are_flagged_and_persisted() {
        let store = MemoryStore::new();
        let service =
            TriageService::new(Arc::new(FixedProvider("Low")), Arc::new(store.clone()));
        let reading = VitalsReading::new(120, 180, 95).unwrap();

        let outcome = service.flag_vitals(&reading, PatientInfo::new()).await;

        assert_eq!(outcome.flags, VitalsFlags::new(true, true, false));
        assert!(outcome.error.is_none());

        let records = service.recent_vitals(1).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pulse, 120);
        assert_eq!(records[0].systolic_bp, 180);
        assert!(records[0].any_flag);
    }

    #[tokio::test]
    async fn vitals_store_failure_is_reported() {
        let service =
            TriageService::new(Arc::new(FixedProvider("Low")), Arc::new(UnreachableStore));
        let reading = VitalsReading::new(80, 120, 80).unwrap();

        let outcome = service.flag_vitals(&reading, PatientInfo::new()).await;

        assert!(!outcome.flags.any_flag());
        assert!(outcome.record_id.is_none());
        assert!(outcome.error.is_some());
        assert!(service.recent_vitals(10).await.is_empty());
        assert!(service.probe_store().await.is_err());
    }

    #[tokio::test]
    async fn stats_cover_both_tables() {
        let service = TriageService::new(
            Arc::new(FailingProvider(ProviderError::Timeout)),
            Arc::new(MemoryStore::new()),
        );
        for text in ["seizure", "coma now", "mild pain"] {
            service
                .triage_patient(&symptoms(text), PatientInfo::new(), true)
                .await;
        }
        for (p, s, d) in [(80, 120, 80), (120, 180, 95)] {
            let reading = VitalsReading::new(p, s, d).unwrap();
            service.flag_vitals(&reading, PatientInfo::new()).await;
        }

        let stats = service.stats().await;
        assert_eq!(stats.triage.total_assessments, 3);
        assert_eq!(stats.triage.levels_breakdown.get("Critical"), Some(&2));
        assert_eq!(stats.triage.levels_breakdown.get("Low"), Some(&1));
        assert_eq!(stats.vitals.total_checks, 2);
        assert_eq!(stats.vitals.flagged_cases, 1);
        assert_eq!(stats.vitals.flag_percentage, 50.0);
    }
}
