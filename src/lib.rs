//! # chatbot-server
//!
//! A small HTTP service that answers Amharic questions with a pre-trained
//! question/response model. When no model can be loaded, a rule-based
//! responder answers instead, so the chat endpoint stays available.

pub mod config;
pub mod error;
pub mod fallback;
pub mod model;
pub mod server;
pub mod text;

pub use config::ServiceConfig;
pub use error::{ApiError, ModelError};
pub use fallback::fallback_reply;
pub use model::{resolve_model_path, LoadOutcome, ModelStore};
pub use text::normalize;

/// Crate version reported by `GET /`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name reported by `GET /`.
pub const SERVICE_NAME: &str = "Amharic Chatbot API";
