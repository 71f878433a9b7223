//! HTTP boundary: `POST /query` and `GET /health`.

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::any::Any;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as CorsAny, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::{AllowedOrigins, AppConfig};
use crate::error::AppError;
use crate::models::{HealthResponse, QueryRequest, QueryResponse};
use crate::service::QueryService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<QueryService>,
}

pub fn build_app(state: AppState, origins: &AllowedOrigins) -> Router {
    let default_answer = state.service.default_answer().to_string();

    let router = Router::new()
        .route("/query", post(query))
        .route("/health", get(health))
        .with_state(state);

    with_layers(router, default_answer, origins)
}

/// Wraps `router` with tracing, CORS and the panic safety net.
fn with_layers(router: Router, default_answer: String, origins: &AllowedOrigins) -> Router {
    let safety_net = CatchPanicLayer::custom(move |panic: Box<dyn Any + Send + 'static>| {
        let detail = panic
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| panic.downcast_ref::<&str>().copied())
            .unwrap_or("unknown panic");
        error!(panic = %detail, "Request handler panicked, answering with default entry");

        (
            StatusCode::OK,
            Json(QueryResponse {
                answer: default_answer.clone(),
            }),
        )
            .into_response()
    });

    router
        .layer(safety_net)
        .layer(cors_layer(origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    let allow_origin = match origins {
        AllowedOrigins::Any => AllowOrigin::any(),
        AllowedOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(origin = %origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(values)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(CorsAny)
        .allow_headers(CorsAny)
}

/// POST /query – answers one utterance, always with 200.
async fn query(State(state): State<AppState>, Json(request): Json<QueryRequest>) -> Json<QueryResponse> {
    let packet = state.service.answer(&request.query).await;
    Json(QueryResponse {
        answer: packet.answer,
    })
}

/// GET /health – liveness check.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: &AppConfig, state: AppState) -> Result<(), AppError> {
    let addr = config.socket_addr()?;
    let app = build_app(state, &config.cors_allowed_origins);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "FURIA chatbot listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
