use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;

mod handlers;
mod models;
mod state;

use state::AppState;

/// Uploads are capped well above any realistic text PDF.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = polyglot_core::Config::from_env();
    if config.api_key.is_none() {
        tracing::warn!(
            "POLYGLOT_API_KEY is not set; translation requests will fail until it is configured"
        );
    }
    tracing::info!(target_lang = %config.target_lang, "starting translation service");

    let state = Arc::new(AppState::new(config));
    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 5001));
    tracing::info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn app(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route(
            "/translate",
            axum::routing::post(handlers::translate::translate),
        )
        .layer(axum::extract::DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
