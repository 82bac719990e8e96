//! Axum-based HTTP server.

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{legacy, structured, AppState, RpcError, ServerConfig};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// `GET /health`
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "Mock UIDAI Server",
    })
}

/// Build the router with every endpoint of both API families.
pub fn build_router(state: AppState, enable_cors: bool) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/api/otp/request", post(structured::request_otp))
        .route("/api/otp/verify", post(structured::verify_otp))
        .route("/uidotp/2.5/:version/:variant", post(legacy::generate_otp))
        .route("/uidkyc/kyc/2.5/:version/:variant", post(legacy::ekyc))
        .with_state(state);

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

pub struct RpcServer {
    config: ServerConfig,
    state: AppState,
}

impl RpcServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone(), self.config.enable_cors)
    }

    /// Bind the configured address and serve until `shutdown` fires.
    pub async fn start(&self, shutdown: broadcast::Receiver<()>) -> Result<(), RpcError> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` fires.
    pub async fn serve(
        &self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), RpcError> {
        info!("KYC server listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;
        info!("KYC server stopped");
        Ok(())
    }
}
