//! In-process [`RecordStore`] implementation.

use super::{InsertReceipt, RecordStore, Table};
use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Keeps rows in memory, assigning uuid identifiers and RFC 3339 timestamps on insert.
///
/// Rows are returned newest first, which is insertion order reversed.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<HashMap<Table, Vec<serde_json::Value>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows held for `table`.
    pub fn len(&self, table: Table) -> usize {
        self.tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&table)
            .map_or(0, Vec::len)
    }

    pub fn is_empty(&self, table: Table) -> bool {
        self.len(table) == 0
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(
        &self,
        table: Table,
        record: serde_json::Value,
    ) -> Result<InsertReceipt, StoreError> {
        let serde_json::Value::Object(mut row) = record else {
            return Err(StoreError::InvalidResponse(
                "records must be JSON objects".into(),
            ));
        };

        let receipt = InsertReceipt {
            id: uuid::Uuid::new_v4().simple().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        row.insert("id".into(), receipt.id.clone().into());
        row.insert("created_at".into(), receipt.created_at.clone().into());

        self.tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(table)
            .or_default()
            .push(serde_json::Value::Object(row));

        Ok(receipt)
    }

    async fn select_recent(
        &self,
        table: Table,
        limit: usize,
    ) -> Result<Vec<serde_json::Value>, StoreError> {
        let tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(tables
            .get(&table)
            .map(|rows| rows.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn returns_newest_first_up_to_limit() {
        let store = MemoryStore::new();
        for n in 0..5 {
            store.insert(Table::Vitals, json!({ "n": n })).await.unwrap();
        }

        let rows = store.select_recent(Table::Vitals, 3).await.unwrap();
        let ns: Vec<i64> = rows.iter().map(|r| r["n"].as_i64().unwrap()).collect();
        assert_eq!(ns, vec![4, 3, 2]);
        assert_eq!(store.len(Table::Vitals), 5);
        assert!(store.is_empty(Table::Triage));
    }

    #[tokio::test]
    async fn tables_are_independent() {
        let store = MemoryStore::new();
        store.insert(Table::Triage, json!({})).await.unwrap();
        assert!(store
            .select_recent(Table::Vitals, 10)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn rejects_non_object_rows() {
        let store = MemoryStore::new();
        assert!(store.insert(Table::Triage, json!([1, 2])).await.is_err());
    }
}
