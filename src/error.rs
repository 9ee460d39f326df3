//! Error types for model loading, prediction, and the HTTP layer.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Errors raised while loading a model artifact or running a prediction.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The resolved artifact path does not exist.
    #[error("Model file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// File I/O error while reading the artifact.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The artifact is not valid JSON for the expected shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The artifact parsed but is not a usable model.
    #[error("Invalid model artifact: {0}")]
    Invalid(String),

    /// The model failed while producing a response.
    #[error("{0}")]
    Prediction(String),
}

/// Errors surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// `question` absent, null, or blank after trimming.
    #[error("No question provided")]
    MissingInput,

    /// The request body is not JSON.
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    /// The loaded model raised during inference.
    #[error("Prediction failed: {0}")]
    Prediction(String),

    /// `/admin/reload` could not load a model.
    #[error("{error}")]
    ReloadFailed {
        model_path: String,
        skip: bool,
        error: String,
    },

    /// Worker pool failure or other server-side fault.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingInput | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Prediction(_) | ApiError::ReloadFailed { .. } | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            // Reload failures keep the regular reload fields alongside the error.
            ApiError::ReloadFailed {
                model_path,
                skip,
                error,
            } => serde_json::json!({
                "reloaded": false,
                "model_loaded": false,
                "model_path": model_path,
                "skip": skip,
                "error": error,
            }),
            _ => serde_json::json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(ApiError::MissingInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidBody("eof".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Prediction("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Internal("join".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_reload_failure_body_keeps_reload_fields() {
        let err = ApiError::ReloadFailed {
            model_path: "/srv/model.json".into(),
            skip: true,
            error: "Model file not found: /srv/model.json".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["reloaded"], false);
        assert_eq!(json["model_loaded"], false);
        assert_eq!(json["model_path"], "/srv/model.json");
        assert_eq!(json["skip"], true);
        assert_eq!(json["error"], "Model file not found: /srv/model.json");
    }

    #[test]
    fn test_prediction_message_includes_cause() {
        let err = ApiError::Prediction(ModelError::Prediction("no match".into()).to_string());
        assert_eq!(err.to_string(), "Prediction failed: no match");
    }
}
