//! Axum server setup
//!
//! - CORS: any origin by default, or an explicit allow-list
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::auth::TokenIssuer;
use crate::models::LocaleSet;
use crate::store::ContentStore;

/// Default listen port
pub const DEFAULT_PORT: u16 = 4000;

/// Which browser origins may call the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin
    Permissive,
    /// Only the listed origins
    Origins(Vec<String>),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:4000)
    pub bind_addr: SocketAddr,

    pub cors: CorsPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            cors: CorsPolicy::Permissive,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub tokens: TokenIssuer,
    /// Locales new or edited pages may use
    pub locales: LocaleSet,
}

/// Build the application router (no CORS layer).
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::auth::router())
        .merge(routes::pages::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(policy: &CorsPolicy) -> Result<CorsLayer, ServerError> {
    match policy {
        CorsPolicy::Permissive => {
            tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
            Ok(CorsLayer::permissive())
        }
        CorsPolicy::Origins(origins) => {
            let origins = origins
                .iter()
                .map(|o| {
                    o.parse::<HeaderValue>()
                        .map_err(|_| ServerError::InvalidOrigin(o.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any))
        }
    }
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(AppState { store, tokens, locales: LocaleSet::default() });
/// run_server(state, ServerConfig::default()).await?;
/// ```
pub async fn run_server(state: Arc<AppState>, config: ServerConfig) -> Result<(), ServerError> {
    let cors = cors_layer(&config.cors)?;
    tracing::info!(
        store = state.store.backend_name(),
        locales = ?state.locales.iter().collect::<Vec<_>>(),
        "Application state ready"
    );

    let app = router(state).layer(cors);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CORS origin: {0}")]
    InvalidOrigin(String),
}
