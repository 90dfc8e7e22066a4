//! # API REST
//!
//! REST API implementation for T-Flow.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, error bodies)
//!
//! Uses `api-shared` for request and response types. The server binary lives in the workspace
//! root package; this crate only builds the [`Router`].

#![warn(rust_2018_idioms)]

pub mod error;
pub mod extract;
pub mod handlers;

use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tflow_core::TriageService;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: TriageService,
}

impl AppState {
    pub fn new(service: TriageService) -> Self {
        Self { service }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "T-Flow AI Medical Triage API"),
    paths(
        handlers::root,
        handlers::health,
        handlers::create_triage,
        handlers::check_vitals,
        handlers::recent_triage,
        handlers::recent_vitals,
        handlers::stats,
    ),
    components(schemas(
        api_shared::RootRes,
        api_shared::HealthRes,
        api_shared::TriageReq,
        api_shared::TriageRes,
        api_shared::VitalsReq,
        api_shared::VitalsRes,
        api_shared::VitalsFlagsRes,
        api_shared::TriageRecordRes,
        api_shared::VitalsRecordRes,
        api_shared::RecentTriageRes,
        api_shared::RecentVitalsRes,
        api_shared::TriageStatsRes,
        api_shared::VitalsStatsRes,
        api_shared::StatsRes,
        api_shared::ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Builds the full application router, including Swagger UI at `/docs`.
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/health", get(handlers::health))
        .route("/api/triage", post(handlers::create_triage))
        .route("/api/vitals", post(handlers::check_vitals))
        .route("/api/triage/recent", get(handlers::recent_triage))
        .route("/api/vitals/recent", get(handlers::recent_vitals))
        .route("/api/stats", get(handlers::stats))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(cors)
        .with_state(state)
}

/// CORS policy from a comma-separated list of allowed origins.
///
/// With no list every origin is allowed.
///
/// # Errors
/// Returns an error if an origin is not a valid header value.
pub fn cors_layer(origins: Option<&str>) -> anyhow::Result<CorsLayer> {
    let Some(origins) = origins.filter(|o| !o.trim().is_empty()) else {
        return Ok(CorsLayer::permissive());
    };

    let origins = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any))
}
