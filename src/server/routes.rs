//! Axum route handlers for the chatbot HTTP server.
//!
//! # Routes
//!
//! - `GET       /`             — Service descriptor
//! - `GET       /health`       — `{status, model_loaded, demo_mode, model_path}`
//! - `POST      /chat`         — `{"question": "..."}` → `{"response": "..."}`
//! - `GET|POST  /admin/reload` — Re-resolve and reload the model artifact
//!
//! The same routes are also mounted under `/api`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::error::ApiError;
use crate::fallback::fallback_reply;
use crate::model::ModelStore;
use crate::text::normalize;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The single model store for this process.
    pub store: Arc<ModelStore>,
    /// Mirrors `SKIP_MODEL_LOAD`.
    pub skip_model_load: bool,
}

impl AppState {
    pub fn new(store: Arc<ModelStore>, config: &ServiceConfig) -> Self {
        Self {
            store,
            skip_model_load: config.skip_model_load,
        }
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(status_handler))
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .route("/admin/reload", get(reload_handler).post(reload_handler))
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(api_routes())
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / — static service descriptor.
async fn status_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "online",
        "service": crate::SERVICE_NAME,
        "version": crate::VERSION,
        "endpoints": {
            "chat": "/chat (POST)",
            "health": "/health (GET)",
            "reload": "/admin/reload (GET, POST)",
        },
    }))
}

/// GET /health — model status.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let status = state.store.status();
    Json(serde_json::json!({
        "status": "healthy",
        "model_loaded": status.loaded,
        "demo_mode": state.skip_model_load || !status.loaded,
        "model_path": status.path.map(|p| p.to_string_lossy().to_string()),
    }))
}

/// Pull `question` out of a chat body.
///
/// Strings pass through; numbers and booleans use their string form.
fn extract_question(body: &Value) -> Option<String> {
    match body.get("question")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// POST /chat — answer a question.
///
/// The body is parsed as JSON regardless of `Content-Type`. With a model
/// loaded the normalized question goes to the model; without one the raw
/// question goes to the fallback responder and the reply is tagged
/// `meta.mode = "demo"`.
async fn chat_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let body: Value =
        serde_json::from_slice(&body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let question = extract_question(&body)
        .filter(|q| !q.trim().is_empty())
        .ok_or(ApiError::MissingInput)?;

    let Some(model) = state.store.current() else {
        tracing::debug!("No model loaded, answering in demo mode");
        return Ok(Json(serde_json::json!({
            "response": fallback_reply(&question),
            "meta": { "mode": "demo" },
        })));
    };

    let normalized = normalize(&question);

    // Prediction is synchronous, so run it on the blocking pool.
    let result = tokio::task::spawn_blocking(move || model.predict(&normalized)).await;

    match result {
        Ok(Ok(response)) => Ok(Json(serde_json::json!({ "response": response }))),
        Ok(Err(e)) => {
            tracing::error!("Prediction failed: {}", e);
            Err(ApiError::Prediction(e.to_string()))
        }
        Err(join_error) => {
            tracing::error!("Prediction task panicked: {}", join_error);
            Err(ApiError::Internal(join_error.to_string()))
        }
    }
}

/// GET|POST /admin/reload — reload the model from disk.
///
/// Responds 200 when the model loaded and 500 otherwise. Both bodies
/// carry `{reloaded, model_loaded, model_path, skip}`, taken from this
/// call's own load outcome.
async fn reload_handler(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let store = state.store.clone();
    let outcome = tokio::task::spawn_blocking(move || store.load())
        .await
        .map_err(|e| ApiError::Internal(format!("Reload task panicked: {}", e)))?;

    let model_path = outcome.path.to_string_lossy().to_string();
    if !outcome.loaded {
        return Err(ApiError::ReloadFailed {
            model_path,
            skip: state.skip_model_load,
            error: outcome.error.unwrap_or_default(),
        });
    }

    Ok(Json(serde_json::json!({
        "reloaded": true,
        "model_loaded": true,
        "model_path": model_path,
        "skip": state.skip_model_load,
    })))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
