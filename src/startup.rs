//! Application startup and lifecycle management.

use axum::{
    http::{header, Method},
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::error::ApiError;
use crate::handlers::{delete_pair, health_check, list_pairs, upsert_pair};
use crate::services::SheetClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub sheets: Arc<dyn SheetClient>,
}

pub fn build_router(state: AppState) -> Router {
    // Browsers reject a literal `*` together with credentials, so the
    // request origin is mirrored instead of wildcarded.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(list_pairs))
        .route("/data", post(upsert_pair))
        .route("/data/:key", delete(delete_pair))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Bind the listener and assemble state around the injected spreadsheet
    /// client (port 0 = random port for testing).
    pub async fn build(
        settings: &Settings,
        sheets: Arc<dyn SheetClient>,
    ) -> Result<Self, ApiError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            ApiError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            state: AppState { sheets },
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        tracing::info!("Listening on port {}", self.port);
        axum::serve(self.listener, router).await
    }
}
