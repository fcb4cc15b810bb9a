use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{routing::get, Router};
use grandprix_api::security::JwtConfig;
use grandprix_engine::Evaluator;
use grandprix_runner::{ResourceLimits, RunnerConfig};
use grandprix_storage::ArtifactStore;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration comes first so its log level can seed the filter;
    // RUST_LOG still wins when set.
    let config = config::Config::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Grand Prix server");

    // Initialize database pool and schema
    let pool = grandprix_storage::sqlite::create_pool(&config.database_url).await?;
    grandprix_storage::sqlite::run_migrations(&pool).await?;
    tracing::info!("Database pool initialized");

    // Artifact storage for uploaded submissions
    let artifacts = ArtifactStore::new(&config.submissions_dir);
    artifacts.ensure_dir()?;

    // Sandboxed evaluation pipeline
    let runner_config = RunnerConfig {
        interpreter: config.python_interpreter.clone().into(),
        limits: ResourceLimits::default()
            .with_memory_bytes(config.memory_limit_mb * 1024 * 1024)
            .with_cpu_seconds(config.evaluation_timeout_seconds),
        wall_timeout: Duration::from_secs(config.evaluation_timeout_seconds),
    };
    let evaluator = Arc::new(Evaluator::new(config.data_dir.clone(), runner_config));

    // Build application state
    let api_state = grandprix_api::AppState {
        pool: pool.clone(),
        artifacts,
        evaluator,
        jwt: JwtConfig::from_env(),
        submission_limit: config.submission_limit,
    };

    let app = Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", grandprix_api::routes(api_state))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
