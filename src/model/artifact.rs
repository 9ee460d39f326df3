//! Model artifacts: the opaque predictor interface and the default loader.
//!
//! The server only needs `predict(text) -> text`. Anything implementing
//! [`Predictor`] can be served, and [`ModelLoader`] decides how an artifact
//! on disk becomes one.
//!
//! The bundled [`ResponseTableLoader`] reads a JSON response table:
//!
//! ```json
//! {
//!   "format": "response-table",
//!   "version": 1,
//!   "entries": [ { "question": "ሰላም", "response": "ሰላም! እንዴት ልርዳዎ?" } ],
//!   "default_response": "ይቅርታ፣ አልገባኝም።"
//! }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::text::normalize;

/// Format tag expected in response-table artifacts.
pub const RESPONSE_TABLE_FORMAT: &str = "response-table";

/// Supported response-table schema version.
pub const RESPONSE_TABLE_VERSION: u32 = 1;

/// A loaded model exposing a single prediction operation.
///
/// Implementations must tolerate concurrent `predict` calls.
pub trait Predictor: Send + Sync {
    /// Produce a response for already-normalized input text.
    fn predict(&self, text: &str) -> Result<String, ModelError>;
}

/// Turns an artifact on disk into a [`Predictor`].
pub trait ModelLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Box<dyn Predictor>, ModelError>;
}

/// One question/response pair in the artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableEntry {
    pub question: String,
    pub response: String,
}

/// On-disk layout of a response-table artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseTableArtifact {
    pub format: String,
    pub version: u32,
    pub entries: Vec<TableEntry>,
    #[serde(default)]
    pub default_response: Option<String>,
}

/// Response-table predictor built from a [`ResponseTableArtifact`].
#[derive(Debug, Clone)]
pub struct ResponseTable {
    entries: Vec<IndexedEntry>,
    default_response: Option<String>,
}

#[derive(Debug, Clone)]
struct IndexedEntry {
    question: String,
    tokens: HashSet<String>,
    response: String,
}

fn tokens(text: &str) -> HashSet<String> {
    text.split_whitespace().map(|t| t.to_lowercase()).collect()
}

impl ResponseTable {
    /// Validate an artifact and index its questions.
    pub fn from_artifact(artifact: ResponseTableArtifact) -> Result<Self, ModelError> {
        if artifact.format != RESPONSE_TABLE_FORMAT {
            return Err(ModelError::Invalid(format!(
                "unsupported format '{}'",
                artifact.format
            )));
        }
        if artifact.version != RESPONSE_TABLE_VERSION {
            return Err(ModelError::Invalid(format!(
                "unsupported version {}",
                artifact.version
            )));
        }
        if artifact.entries.is_empty() {
            return Err(ModelError::Invalid("artifact has no entries".to_string()));
        }

        let entries = artifact
            .entries
            .into_iter()
            .map(|entry| {
                let question = normalize(&entry.question).to_lowercase();
                IndexedEntry {
                    tokens: tokens(&question),
                    question,
                    response: entry.response,
                }
            })
            .collect();

        Ok(Self {
            entries,
            default_response: artifact.default_response,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Predictor for ResponseTable {
    fn predict(&self, text: &str) -> Result<String, ModelError> {
        let query = text.to_lowercase();

        if let Some(hit) = self.entries.iter().find(|e| e.question == query) {
            return Ok(hit.response.clone());
        }

        let query_tokens = tokens(&query);
        let mut best: Option<(&IndexedEntry, usize)> = None;
        for entry in &self.entries {
            let overlap = entry.tokens.intersection(&query_tokens).count();
            // Strictly greater keeps the earliest entry on ties.
            if overlap > 0 && best.map_or(true, |(_, score)| overlap > score) {
                best = Some((entry, overlap));
            }
        }
        if let Some((entry, _)) = best {
            return Ok(entry.response.clone());
        }

        self.default_response
            .clone()
            .ok_or_else(|| ModelError::Prediction(format!("no response matches '{}'", text)))
    }
}

/// Loads [`ResponseTable`] models from JSON artifacts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseTableLoader;

impl ModelLoader for ResponseTableLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn Predictor>, ModelError> {
        let raw = fs::read_to_string(path)?;
        let artifact: ResponseTableArtifact = serde_json::from_str(&raw)?;
        let table = ResponseTable::from_artifact(artifact)?;
        tracing::debug!(
            "Response table from {} has {} entries",
            path.display(),
            table.len()
        );
        Ok(Box::new(table))
    }
}
