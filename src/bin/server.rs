//! chatbot-server HTTP server binary.
//!
//! Loads the model artifact (best effort) and serves the chat API.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 5000)
//! - `HOST` — bind address (default: 0.0.0.0)
//! - `MODEL_PATH` — explicit model artifact path
//! - `SKIP_MODEL_LOAD` — report demo mode in `/health`
//! - `RUST_LOG` — Tracing filter (default: "info")
//!
//! # Usage
//!
//! ```bash
//! MODEL_PATH=models/amharic_chatbot.json cargo run --bin server
//! ```

use std::sync::Arc;

use anyhow::Context;
use chatbot_server::server::{app_router, AppState};
use chatbot_server::{ModelStore, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,chatbot_server=debug".into()),
        )
        .init();

    let config = ServiceConfig::from_env();
    let bind_addr = config.bind_addr();

    let store = Arc::new(ModelStore::with_default_loader(&config));
    match store.override_path() {
        Some(path) => tracing::info!("Using MODEL_PATH override {}", path.display()),
        None => tracing::debug!("Resolved model path {}", store.resolve_path().display()),
    }

    // Startup load is best effort; failures leave the service in demo mode.
    let outcome = store.load();
    if !outcome.loaded {
        tracing::warn!("Starting in demo mode: {}", outcome.error.unwrap_or_default());
    }
    if config.skip_model_load {
        tracing::info!("SKIP_MODEL_LOAD is set; /health will report demo mode");
    }

    let app = app_router(AppState::new(store, &config));

    tracing::info!("chatbot server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET       /              — service descriptor");
    tracing::info!("  GET       /health        — model status");
    tracing::info!("  POST      /chat          — ask a question");
    tracing::info!("  GET|POST  /admin/reload  — reload the model");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
