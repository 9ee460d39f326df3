//! Service configuration, read from the process environment.
//!
//! # Environment Variables
//!
//! - `HOST` — bind address (default: `0.0.0.0`)
//! - `PORT` — HTTP port (default: 5000)
//! - `MODEL_PATH` — explicit model artifact path; skips candidate probing
//! - `SKIP_MODEL_LOAD` — advisory flag; only reported through `/health`
//!   (`demo_mode`) and `/admin/reload` (`skip`)

use std::env;
use std::path::PathBuf;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Artifact file name used when nothing else is configured.
pub const DEFAULT_MODEL_FILE: &str = "amharic_chatbot.json";

/// Candidate artifact locations, probed in this order.
pub fn default_candidate_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from(DEFAULT_MODEL_FILE),
        PathBuf::from("models").join(DEFAULT_MODEL_FILE),
        PathBuf::from("/app/models").join(DEFAULT_MODEL_FILE),
    ]
}

/// Runtime configuration for the chatbot service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// `MODEL_PATH`, returned verbatim by the resolver when set.
    pub model_path_override: Option<PathBuf>,
    /// Ordered candidate list; first existing entry wins.
    pub candidate_paths: Vec<PathBuf>,
    /// `SKIP_MODEL_LOAD`. Does not stop `ModelStore::load` from running.
    pub skip_model_load: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path_override: None,
            candidate_paths: default_candidate_paths(),
            skip_model_load: false,
        }
    }
}

impl ServiceConfig {
    /// Build a config from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!("Invalid PORT value '{}', using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);

        let model_path_override = lookup("MODEL_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let skip_model_load = lookup("SKIP_MODEL_LOAD")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        Self {
            host,
            port,
            model_path_override,
            candidate_paths: defaults.candidate_paths,
            skip_model_load,
        }
    }

    /// `host:port` string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
