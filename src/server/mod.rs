//! HTTP server for the chatbot API.
//!
//! # Endpoints
//!
//! - `GET       /`             — Service descriptor
//! - `GET       /health`       — Model status probe
//! - `POST      /chat`         — Ask a question
//! - `GET|POST  /admin/reload` — Reload the model artifact
//!
//! Every endpoint is also reachable under `/api`.

pub mod routes;

pub use routes::{app_router, AppState};
