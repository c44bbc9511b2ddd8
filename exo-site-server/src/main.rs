use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use exo_backend::module::catalog::{RecordLoader, RecordStore};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

mod config;
use config::Config;

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Stats endpoint - server and record information
async fn stats(State(store): State<RecordStore>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "running",
        "service": "exo-site-server",
        "version": env!("CARGO_PKG_VERSION"),
        "exoplanets": store.len(),
        "origin": store.origin(),
    }))
}

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    #[serde(default)]
    search: String,
}

/// Records whose names contain `search`, at most one display page
async fn list_exoplanets(
    State(store): State<RecordStore>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    Json(store.display_page(&params.search).into_iter().cloned().collect::<Vec<_>>())
}

fn app(store: RecordStore, public_directory: impl AsRef<Path>, enable_cors: bool) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/stats", get(stats))
        .route("/api/exoplanets", get(list_exoplanets))
        .with_state(store)
        // Everything else is the static site
        .fallback_service(ServeDir::new(public_directory.as_ref()));

    let router = if enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    // Load configuration
    let config = Config::load("config.toml")?;
    info!("Loaded configuration: {:?}", config);

    let public_path = PathBuf::from(&config.public_directory);
    if !public_path.exists() {
        warn!("Public directory does not exist: {}", config.public_directory);
    }
    info!("Serving site from: {}", public_path.display());

    // Records are loaded once and never change while the server runs
    let loader = RecordLoader::from_config(&config.sources, &config.extractor)?;
    let store = RecordStore::load(&loader).await;
    info!("Loaded {} exoplanets ({})", store.len(), store.origin());

    let app = app(store, &public_path, config.enable_cors);

    let addr = SocketAddr::from((config.bind_ip(), config.port));
    info!("Starting site server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
