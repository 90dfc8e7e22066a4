//! Persistence of triage and vitals records.
//!
//! The external store is reached through [`RecordStore`], which only knows about tables and JSON
//! rows. [`Persistence`] sits on top and speaks in typed records, so the query dialect of any one
//! backend (see the `tflow-supabase` crate) stays out of the rest of the core.

mod memory;

pub use memory::MemoryStore;

use crate::constants::{TRIAGE_TABLE, VITALS_TABLE};
use crate::error::StoreError;
use crate::triage::TriageLevel;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;

/// Free-form patient metadata (age, sex, ward, ...).
pub type PatientInfo = serde_json::Map<String, serde_json::Value>;

/// Tables known to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Triage,
    Vitals,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Triage => TRIAGE_TABLE,
            Table::Vitals => VITALS_TABLE,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier and timestamp assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertReceipt {
    pub id: String,
    pub created_at: String,
}

/// An append-only store of JSON rows.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Appends a row to `table`, returning the identifier and timestamp the store assigned.
    async fn insert(
        &self,
        table: Table,
        record: serde_json::Value,
    ) -> Result<InsertReceipt, StoreError>;

    /// Returns up to `limit` rows of `table`, most recently created first.
    async fn select_recent(
        &self,
        table: Table,
        limit: usize,
    ) -> Result<Vec<serde_json::Value>, StoreError>;
}

/// A triage result as submitted to the store.
#[derive(Debug, Serialize)]
pub struct NewTriageRecord<'a> {
    pub symptoms: &'a str,
    pub triage_level: TriageLevel,
    pub patient_info: &'a PatientInfo,
    pub use_ai: bool,
}

/// A vitals result as submitted to the store.
#[derive(Debug, Serialize)]
pub struct NewVitalsRecord<'a> {
    pub pulse: i32,
    pub systolic_bp: i32,
    pub diastolic_bp: i32,
    pub pulse_flag: bool,
    pub systolic_flag: bool,
    pub diastolic_flag: bool,
    pub any_flag: bool,
    pub patient_info: &'a PatientInfo,
}

/// Label reported for a stored triage row that carries none.
pub const UNKNOWN_LEVEL: &str = "Unknown";

/// A stored triage row.
///
/// The label is the stored text, which may not be one of the four levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageRecord {
    #[serde(default, deserialize_with = "record_id")]
    pub id: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub created_at: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub symptoms: String,
    #[serde(default = "unknown_level", deserialize_with = "level_or_unknown")]
    pub triage_level: String,
    #[serde(default, deserialize_with = "object_or_empty")]
    pub patient_info: PatientInfo,
    #[serde(default, deserialize_with = "bool_or_false")]
    pub use_ai: bool,
}

impl TriageRecord {
    /// The stored label as a [`TriageLevel`], if it is one.
    pub fn level(&self) -> Option<TriageLevel> {
        self.triage_level.parse().ok()
    }
}

/// A stored vitals row. Missing readings decode as zero and missing flags as unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsRecord {
    #[serde(default, deserialize_with = "record_id")]
    pub id: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub created_at: String,
    #[serde(default)]
    pub pulse: i32,
    #[serde(default)]
    pub systolic_bp: i32,
    #[serde(default)]
    pub diastolic_bp: i32,
    #[serde(default, deserialize_with = "bool_or_false")]
    pub pulse_flag: bool,
    #[serde(default, deserialize_with = "bool_or_false")]
    pub systolic_flag: bool,
    #[serde(default, deserialize_with = "bool_or_false")]
    pub diastolic_flag: bool,
    #[serde(default, deserialize_with = "bool_or_false")]
    pub any_flag: bool,
    #[serde(default, deserialize_with = "object_or_empty")]
    pub patient_info: PatientInfo,
}

/// Accepts both numeric (serial) and textual (uuid) primary keys.
fn record_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(s)) => s,
        Some(RawId::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

fn unknown_level() -> String {
    UNKNOWN_LEVEL.to_string()
}

fn level_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|level| level.trim().to_string())
        .filter(|level| !level.is_empty())
        .unwrap_or_else(unknown_level))
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn bool_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

fn object_or_empty<'de, D>(deserializer: D) -> Result<PatientInfo, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<PatientInfo>::deserialize(deserializer)?.unwrap_or_default())
}

/// Typed access to a [`RecordStore`].
///
/// Listings never fail: store errors are logged and yield an empty list. Rows are kept even when
/// fields are missing or the label is not a known level; only rows that are not JSON objects of
/// the right shape at all are skipped. Inserts return the error so the caller can attach a marker
/// to its result.
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn RecordStore>,
}

impl Persistence {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Stores a triage result.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the record cannot be serialised or the store rejects it.
    pub async fn store_triage(
        &self,
        record: &NewTriageRecord<'_>,
    ) -> Result<InsertReceipt, StoreError> {
        self.insert(Table::Triage, record).await
    }

    /// Stores a vitals result.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the record cannot be serialised or the store rejects it.
    pub async fn store_vitals(
        &self,
        record: &NewVitalsRecord<'_>,
    ) -> Result<InsertReceipt, StoreError> {
        self.insert(Table::Vitals, record).await
    }

    /// Most recent triage records, newest first. Empty if the store is unavailable.
    pub async fn recent_triage(&self, limit: usize) -> Vec<TriageRecord> {
        self.recent(Table::Triage, limit).await
    }

    /// Most recent vitals records, newest first. Empty if the store is unavailable.
    pub async fn recent_vitals(&self, limit: usize) -> Vec<VitalsRecord> {
        self.recent(Table::Vitals, limit).await
    }

    /// Checks that the store answers a minimal query.
    pub async fn probe(&self) -> Result<(), StoreError> {
        self.store.select_recent(Table::Triage, 1).await.map(|_| ())
    }

    async fn insert<T: Serialize>(
        &self,
        table: Table,
        record: &T,
    ) -> Result<InsertReceipt, StoreError> {
        let row = serde_json::to_value(record)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        match self.store.insert(table, row).await {
            Ok(receipt) => {
                tracing::info!(%table, id = %receipt.id, "stored record");
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!(%table, error = %e, "failed to store record");
                Err(e)
            }
        }
    }

    async fn recent<T: DeserializeOwned>(&self, table: Table, limit: usize) -> Vec<T> {
        let rows = match self.store.select_recent(table, limit).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(%table, error = %e, "failed to fetch recent records");
                return Vec::new();
            }
        };

        rows.into_iter()
            .filter_map(|row| match serde_json::from_value::<T>(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(%table, error = %e, "skipping undecodable record");
                    None
                }
            })
            .collect()
    }
}
