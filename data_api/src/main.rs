#[warn(clippy::pedantic)]
mod api;
mod error;
mod state;

use crate::error::MainError;
use crate::state::AppState;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use shared::error::InitializationError;
use shared::{load_config, shutdown_listener};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), MainError> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_env_filter(EnvFilter::from_default_env())
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(InitializationError::Tracing)?;

    let config = load_config().map_err(InitializationError::from)?;
    let state = AppState::new(config.data.clone());

    if config.data.load_on_startup {
        // Not fatal; POST /load_data can retry once the files are in place.
        if let Err(e) = state.datasets.reload(&config.data).await {
            warn!(error = ?e, "initial data load failed");
        }
    }

    let app = Router::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .merge(api::router(state))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let listen_addr = config.server.listen_addr;
    let listener = TcpListener::bind(&listen_addr)
        .await
        .map_err(|source| InitializationError::Bind {
            addr: listen_addr.clone(),
            source,
        })?;
    info!("starting server at {listen_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_listener())
        .await?;

    Ok(())
}
