use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, cors_layer, router};
use tflow_core::{CoreConfig, TriageService};
use tflow_groq::GroqClient;
use tflow_supabase::SupabaseStore;

/// Main entry point for the T-Flow triage server
///
/// Resolves configuration, builds the provider and store clients once, and serves the REST API
/// (with Swagger UI at `/docs`) until interrupted.
///
/// # Environment Variables
/// - `GROQ_API_KEY`, `SUPABASE_URL`, `SUPABASE_ANON_KEY`: required
/// - `GROQ_MODEL`, `GROQ_BASE_URL`, `TFLOW_HTTP_TIMEOUT_SECS`: optional client settings
/// - `TFLOW_REST_ADDR`: server address (default: "0.0.0.0:$PORT", `PORT` defaulting to 8000)
/// - `TFLOW_CORS_ORIGINS`: comma-separated allowed origins (default: any origin)
///
/// # Errors
/// Returns an error if required configuration is missing or invalid, or if the server cannot
/// bind its address.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tflow=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::from_env()?;
    tracing::info!(model = %cfg.provider().model, store = %cfg.store().url, "configuration loaded");

    let provider = GroqClient::new(cfg.provider())?;
    let store = SupabaseStore::new(cfg.store())?;
    let service = TriageService::new(Arc::new(provider), Arc::new(store));

    let rest_addr = std::env::var("TFLOW_REST_ADDR").unwrap_or_else(|_| {
        let port = std::env::var("PORT").unwrap_or_else(|_| "8000".into());
        format!("0.0.0.0:{port}")
    });
    let cors = cors_layer(std::env::var("TFLOW_CORS_ORIGINS").ok().as_deref())?;

    let app = router(AppState::new(service), cors);

    tracing::info!("++ Starting T-Flow REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
