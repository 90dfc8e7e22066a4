//! Supabase record store.
//!
//! Talks to the PostgREST interface Supabase exposes under `/rest/v1`. Rows are inserted with
//! `Prefer: return=representation` so the store-assigned `id` and `created_at` come back in the
//! same round trip.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tflow_core::config::StoreSettings;
use tflow_core::store::InsertReceipt;
use tflow_core::{RecordStore, StoreError, Table};

/// PostgREST client for the `triage` and `vitals` tables.
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    rest_url: String,
    api_key: String,
}

impl SupabaseStore {
    /// # Errors
    ///
    /// Returns `StoreError::Config` if the underlying HTTP client cannot be built.
    pub fn new(settings: &StoreSettings) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| StoreError::Config(e.to_string()))?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", settings.url),
            api_key: settings.api_key.clone(),
        })
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    fn authorised(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

#[async_trait]
impl RecordStore for SupabaseStore {
    async fn insert(&self, table: Table, record: Value) -> Result<InsertReceipt, StoreError> {
        let response = self
            .authorised(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(&record)
            .send()
            .await
            .map_err(transport_error)?;

        let rows = rows(checked(response).await?).await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::InvalidResponse("insert returned no rows".into()))?;

        receipt(&row)
    }

    async fn select_recent(&self, table: Table, limit: usize) -> Result<Vec<Value>, StoreError> {
        let limit = limit.to_string();
        let response = self
            .authorised(self.client.get(self.table_url(table)))
            .query(&[
                ("select", "*"),
                ("order", "created_at.desc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        rows(checked(response).await?).await
    }
}

async fn checked(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(StoreError::Status {
        status: status.as_u16(),
        message: response.text().await.unwrap_or_default(),
    })
}

async fn rows(response: Response) -> Result<Vec<Value>, StoreError> {
    match response.json::<Value>().await.map_err(transport_error)? {
        Value::Array(rows) => Ok(rows),
        other => Err(StoreError::InvalidResponse(format!(
            "expected an array of rows, got {other}"
        ))),
    }
}

fn receipt(row: &Value) -> Result<InsertReceipt, StoreError> {
    let id = match row.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(StoreError::InvalidResponse("row has no id".into())),
    };
    let created_at = row
        .get("created_at")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::InvalidResponse("row has no created_at".into()))?
        .to_string();

    Ok(InsertReceipt { id, created_at })
}

fn transport_error(e: reqwest::Error) -> StoreError {
    if e.is_timeout() {
        StoreError::Timeout
    } else if e.is_decode() {
        StoreError::InvalidResponse(e.to_string())
    } else {
        StoreError::ConnectionFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, Query};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn store(url: String) -> SupabaseStore {
        SupabaseStore::new(&StoreSettings {
            url,
            api_key: "anon".into(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn insert_returns_assigned_id_and_timestamp() {
        let app = Router::new().route(
            "/rest/v1/:table",
            axum::routing::post(
                |Path(table): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    assert_eq!(table, "triage");
                    assert_eq!(headers.get("apikey").unwrap(), "anon");
                    assert_eq!(headers.get("authorization").unwrap(), "Bearer anon");
                    assert_eq!(headers.get("prefer").unwrap(), "return=representation");
                    assert_eq!(body["triage_level"], "Urgent");
                    (
                        StatusCode::CREATED,
                        Json(json!([{
                            "id": 7,
                            "created_at": "2025-03-01T10:00:00+00:00",
                            "triage_level": "Urgent"
                        }])),
                    )
                },
            ),
        );
        let base = spawn(app).await;

        let receipt = store(base)
            .insert(Table::Triage, json!({"triage_level": "Urgent"}))
            .await
            .unwrap();

        assert_eq!(receipt.id, "7");
        assert_eq!(receipt.created_at, "2025-03-01T10:00:00+00:00");
    }

    #[tokio::test]
    async fn insert_without_rows_is_invalid() {
        let app = Router::new().route(
            "/rest/v1/:table",
            axum::routing::post(|| async { (StatusCode::CREATED, Json(json!([]))) }),
        );
        let base = spawn(app).await;

        let result = store(base).insert(Table::Vitals, json!({})).await;
        assert!(matches!(result, Err(StoreError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn rejected_insert_reports_status() {
        let app = Router::new().route(
            "/rest/v1/:table",
            axum::routing::post(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
        );
        let base = spawn(app).await;

        let result = store(base).insert(Table::Triage, json!({})).await;
        assert_eq!(
            result,
            Err(StoreError::Status {
                status: 401,
                message: "invalid api key".into()
            })
        );
    }

    #[tokio::test]
    async fn select_recent_orders_by_creation_and_limits() {
        let app = Router::new().route(
            "/rest/v1/:table",
            get(
                |Path(table): Path<String>, Query(params): Query<HashMap<String, String>>| async move {
                    assert_eq!(table, "vitals");
                    assert_eq!(params["select"], "*");
                    assert_eq!(params["order"], "created_at.desc");
                    assert_eq!(params["limit"], "2");
                    Json(json!([{"id": "b"}, {"id": "a"}]))
                },
            ),
        );
        let base = spawn(app).await;

        let rows = store(base).select_recent(Table::Vitals, 2).await.unwrap();
        assert_eq!(rows, vec![json!({"id": "b"}), json!({"id": "a"})]);
    }

    #[tokio::test]
    async fn non_array_listing_is_invalid() {
        let app = Router::new().route(
            "/rest/v1/:table",
            get(|| async { Json(json!({"message": "oops"})) }),
        );
        let base = spawn(app).await;

        let result = store(base).select_recent(Table::Triage, 10).await;
        assert!(matches!(result, Err(StoreError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn unreachable_store_fails_to_connect() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = store(format!("http://{addr}"))
            .select_recent(Table::Triage, 1)
            .await;
        assert!(matches!(result, Err(StoreError::ConnectionFailed(_))));
    }

    #[test]
    fn receipt_accepts_text_ids() {
        let receipt = receipt(&json!({"id": "uuid-1", "created_at": "t"})).unwrap();
        assert_eq!(receipt.id, "uuid-1");
        assert!(super::receipt(&json!({"created_at": "t"})).is_err());
    }
}
