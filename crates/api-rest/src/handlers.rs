//! HTTP handlers.
//!
//! Handlers validate their input, call into [`tflow_core::TriageService`] and translate the result
//! into the response bodies from `api-shared`.

use crate::error::ApiError;
use crate::extract::{JsonBody, QueryParams};
use crate::AppState;
use api_shared::{
    now_timestamp, ErrorRes, HealthRes, HealthService, RecentTriageRes, RecentVitalsRes, RootRes,
    StatsRes, TriageReq, TriageRes, VitalsReq, VitalsRes,
};
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tflow_core::constants::DEFAULT_RECENT_LIMIT;
use tflow_core::validation::validate_recent_limit;
use tflow_core::{SymptomText, VitalsReading};
use utoipa::IntoParams;

/// Query string for the recent-record listings.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentQuery {
    /// Number of records to return, 1 to 100 (default 10).
    pub limit: Option<i64>,
}

impl RecentQuery {
    fn resolve(&self) -> Result<usize, ApiError> {
        validate_recent_limit(self.limit.unwrap_or(DEFAULT_RECENT_LIMIT as i64))
            .map_err(ApiError::bad_request)
    }
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = RootRes)
    )
)]
#[axum::debug_handler]
pub async fn root() -> Json<RootRes> {
    Json(HealthService::banner())
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Liveness check for monitoring and load balancers.
#[axum::debug_handler]
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/api/triage",
    request_body = TriageReq,
    responses(
        (status = 200, description = "Triage level assigned", body = TriageRes),
        (status = 400, description = "Invalid symptoms", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Assigns a triage level to a symptom description.
///
/// The language model is consulted when `use_ai` is set (the default). If it cannot answer, the
/// keyword rules decide instead; the caller is not told which path produced the label. A result
/// that could not be stored still comes back, with `record_id` null and `error` set.
///
/// # Errors
/// Returns `400 Bad Request` if the body is not valid JSON for [`TriageReq`], or if the symptoms
/// are blank, outside 5..=2000 characters, or appear to contain sensitive personal information.
#[axum::debug_handler]
pub async fn create_triage(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TriageReq>,
) -> Result<Json<TriageRes>, ApiError> {
    let symptoms = SymptomText::new(&req.symptoms).map_err(ApiError::invalid_input)?;

    let outcome = state
        .service
        .triage_patient(&symptoms, req.patient_info.unwrap_or_default(), req.use_ai)
        .await;

    Ok(Json(outcome.into()))
}

#[utoipa::path(
    post,
    path = "/api/vitals",
    request_body = VitalsReq,
    responses(
        (status = 200, description = "Vital signs flagged", body = VitalsRes),
        (status = 400, description = "Vital signs out of range", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Flags pulse and blood pressure readings outside normal ranges.
///
/// # Errors
/// Returns `400 Bad Request` if the body is not valid JSON for [`VitalsReq`], a reading is outside
/// its accepted range, or the diastolic pressure is not below the systolic pressure.
#[axum::debug_handler]
pub async fn check_vitals(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<VitalsReq>,
) -> Result<Json<VitalsRes>, ApiError> {
    let reading = VitalsReading::new(req.pulse, req.systolic_bp, req.diastolic_bp)
        .map_err(ApiError::invalid_input)?;

    let outcome = state
        .service
        .flag_vitals(&reading, req.patient_info.unwrap_or_default())
        .await;

    Ok(Json(outcome.into()))
}

#[utoipa::path(
    get,
    path = "/api/triage/recent",
    params(RecentQuery),
    responses(
        (status = 200, description = "Most recent triage records", body = RecentTriageRes),
        (status = 400, description = "Limit out of range or not a number", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn recent_triage(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<RecentQuery>,
) -> Result<Json<RecentTriageRes>, ApiError> {
    let limit = query.resolve()?;
    let records = state.service.recent_triage(limit).await;
    Ok(Json(RecentTriageRes::new(records, now_timestamp())))
}

#[utoipa::path(
    get,
    path = "/api/vitals/recent",
    params(RecentQuery),
    responses(
        (status = 200, description = "Most recent vitals records", body = RecentVitalsRes),
        (status = 400, description = "Limit out of range or not a number", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn recent_vitals(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<RecentQuery>,
) -> Result<Json<RecentVitalsRes>, ApiError> {
    let limit = query.resolve()?;
    let records = state.service.recent_vitals(limit).await;
    Ok(Json(RecentVitalsRes::new(records, now_timestamp())))
}

#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Usage statistics over the last 100 records", body = StatsRes)
    )
)]
/// Label breakdown and flag rate over the 100 most recent records of each kind.
#[axum::debug_handler]
pub async fn stats(State(state): State<AppState>) -> Json<StatsRes> {
    let stats = state.service.stats().await;
    Json(StatsRes::new(stats, now_timestamp()))
}
