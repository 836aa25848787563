//! HTTP adapter around the lookup core.
//!
//! # Responsibilities
//! - Create the Axum router and wire up middleware (trace, request ID,
//!   CORS, timeout)
//! - Extract and guard the `cep` query parameter
//! - Serialize lookup responses as JSON
//!
//! # Design Decisions
//! - Race outcomes (including timeout and total failure) serialize as
//!   200 with the error carried in the body, matching the original wire
//!   behavior; only a missing or malformed `cep` is a 400
//! - CORS allows any origin for GET/OPTIONS, as the original handler did

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::lookup::LookupService;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LookupService>,
}

/// HTTP server for the lookup service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving the given lookup service.
    pub fn new(config: &ServiceConfig, service: Arc<LookupService>) -> Self {
        let router = Self::build_router(config, AppState { service });
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);

        // Safety net only; the race deadline bounds the handler itself.
        let request_timeout =
            Duration::from_millis(config.lookup.deadline_ms) + Duration::from_secs(5);
        let timeout = TimeoutLayer::with_status_code(StatusCode::GATEWAY_TIMEOUT, request_timeout);

        Router::new()
            .route("/", get(lookup_handler))
            .route("/cep", get(lookup_handler))
            .with_state(state)
            .layer(timeout)
            .layer(cors)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct LookupQuery {
    cep: Option<String>,
}

/// Main lookup handler: validate the key, race the upstreams.
async fn lookup_handler(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Response {
    let cep = query.cep.unwrap_or_default();
    let cep = cep.trim();

    if cep.is_empty() {
        return (StatusCode::BAD_REQUEST, "CEP não fornecido").into_response();
    }

    // The key is substituted into upstream URL templates; reject anything
    // that could smuggle path or query syntax.
    if !cep.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return (StatusCode::BAD_REQUEST, "CEP inválido").into_response();
    }

    let response = state.service.handle(cep).await;
    Json(response).into_response()
}
