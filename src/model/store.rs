//! The model store: owns the currently loaded model and reloads it on demand.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::artifact::{ModelLoader, Predictor, ResponseTableLoader};
use super::resolver::resolve_model_path;
use crate::config::ServiceConfig;
use crate::error::ModelError;

/// A model that loaded successfully, plus where and when it came from.
pub struct LoadedModel {
    predictor: Box<dyn Predictor>,
    pub path: PathBuf,
    pub loaded_at: DateTime<Utc>,
}

impl LoadedModel {
    pub fn predict(&self, text: &str) -> Result<String, ModelError> {
        self.predictor.predict(text)
    }
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("path", &self.path)
            .field("loaded_at", &self.loaded_at)
            .finish_non_exhaustive()
    }
}

/// Result of a [`ModelStore::load`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub loaded: bool,
    pub path: PathBuf,
    /// Failure description; `None` on success.
    pub error: Option<String>,
}

/// Point-in-time view of the store, taken under a single read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelStatus {
    pub loaded: bool,
    /// Path of the loaded model, or of the last failed attempt.
    pub path: Option<PathBuf>,
}

#[derive(Default)]
struct StoreState {
    current: Option<Arc<LoadedModel>>,
    /// Last path `load()` tried, kept on failure.
    last_path: Option<PathBuf>,
}

/// Holds at most one loaded model.
///
/// Readers clone the `Arc` out of the lock, so a reload never disturbs a
/// prediction already in flight.
pub struct ModelStore {
    override_path: Option<PathBuf>,
    candidates: Vec<PathBuf>,
    loader: Box<dyn ModelLoader>,
    state: RwLock<StoreState>,
}

impl ModelStore {
    /// Create an empty store that loads with `loader`.
    pub fn new(config: &ServiceConfig, loader: Box<dyn ModelLoader>) -> Self {
        Self {
            override_path: config.model_path_override.clone(),
            candidates: config.candidate_paths.clone(),
            loader,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Create an empty store using the JSON response-table loader.
    pub fn with_default_loader(config: &ServiceConfig) -> Self {
        Self::new(config, Box::new(ResponseTableLoader))
    }

    /// Resolve the artifact path and (re)load the model.
    ///
    /// Never fails outright: on any error the store is left empty and the
    /// outcome carries the reason.
    pub fn load(&self) -> LoadOutcome {
        let path = resolve_model_path(self.override_path.as_deref(), &self.candidates);

        let result = if path.exists() {
            self.loader.load(&path)
        } else {
            Err(ModelError::NotFound(path.clone()))
        };

        let mut state = self.state.write();
        state.last_path = Some(path.clone());

        match result {
            Ok(predictor) => {
                let model = LoadedModel {
                    predictor,
                    path: path.clone(),
                    loaded_at: Utc::now(),
                };
                tracing::info!(
                    "Model loaded from {} at {}",
                    path.display(),
                    model.loaded_at.to_rfc3339()
                );
                state.current = Some(Arc::new(model));
                LoadOutcome {
                    loaded: true,
                    path,
                    error: None,
                }
            }
            Err(e) => {
                match &e {
                    ModelError::NotFound(_) => tracing::warn!("{}", e),
                    _ => tracing::error!("Error loading model from {}: {}", path.display(), e),
                }
                state.current = None;
                LoadOutcome {
                    loaded: false,
                    path,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// The currently loaded model, if any.
    pub fn current(&self) -> Option<Arc<LoadedModel>> {
        self.state.read().current.clone()
    }

    /// Loaded flag and path, read together.
    pub fn status(&self) -> ModelStatus {
        let state = self.state.read();
        ModelStatus {
            loaded: state.current.is_some(),
            path: match &state.current {
                Some(model) => Some(model.path.clone()),
                None => state.last_path.clone(),
            },
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.state.read().current.is_some()
    }

    /// Path of the loaded model, or of the last failed attempt.
    pub fn model_path(&self) -> Option<PathBuf> {
        self.status().path
    }

    /// Path `load()` would try right now.
    pub fn resolve_path(&self) -> PathBuf {
        resolve_model_path(self.override_path.as_deref(), &self.candidates)
    }

    /// The configured override, if any.
    pub fn override_path(&self) -> Option<&Path> {
        self.override_path.as_deref()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::artifact::{
        ResponseTableArtifact, TableEntry, RESPONSE_TABLE_FORMAT, RESPONSE_TABLE_VERSION,
    };
    use std::fs;

    pub(crate) fn write_artifact(path: &Path) {
        let artifact = ResponseTableArtifact {
            format: RESPONSE_TABLE_FORMAT.to_string(),
            version: RESPONSE_TABLE_VERSION,
            entries: vec![TableEntry {
                question: "ሰላም".into(),
                response: "ሰላም ነው".into(),
            }],
            default_response: Some("ከሞዴሉ የተገኘ መልስ".into()),
        };
        fs::write(path, serde_json::to_string(&artifact).unwrap()).unwrap();
    }

    fn config_for(path: &Path) -> ServiceConfig {
        ServiceConfig {
            model_path_override: Some(path.to_path_buf()),
            ..ServiceConfig::default()
        }
    }

    #[test]
    fn test_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::with_default_loader(&config_for(&dir.path().join("m.json")));
        assert!(!store.is_loaded());
        assert!(store.current().is_none());
        assert!(store.model_path().is_none());
    }

    #[test]
    fn test_status_reads_flag_and_path_together() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let store = ModelStore::with_default_loader(&config_for(&path));

        store.load();
        assert_eq!(
            store.status(),
            ModelStatus {
                loaded: false,
                path: Some(path.clone()),
            }
        );

        write_artifact(&path);
        store.load();
        assert_eq!(
            store.status(),
            ModelStatus {
                loaded: true,
                path: Some(path),
            }
        );
    }

    #[test]
    fn test_load_missing_path_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let store = ModelStore::with_default_loader(&config_for(&path));

        let outcome = store.load();
        assert!(!outcome.loaded);
        assert_eq!(outcome.path, path);
        assert!(outcome.error.unwrap().contains("not found"));
        assert!(!store.is_loaded());
        assert_eq!(store.model_path(), Some(path));
    }

    #[test]
    fn test_load_success_then_predict() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        write_artifact(&path);
        let store = ModelStore::with_default_loader(&config_for(&path));

        let outcome = store.load();
        assert!(outcome.loaded);
        assert!(outcome.error.is_none());

        let model = store.current().unwrap();
        assert_eq!(model.path, path);
        assert_eq!(model.predict("ሰላም").unwrap(), "ሰላም ነው");
    }

    #[test]
    fn test_corrupt_artifact_clears_previous_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        write_artifact(&path);
        let store = ModelStore::with_default_loader(&config_for(&path));
        assert!(store.load().loaded);

        fs::write(&path, "{ broken").unwrap();
        let outcome = store.load();
        assert!(!outcome.loaded);
        assert!(outcome.error.unwrap().starts_with("Parse error"));
        assert!(store.current().is_none());
    }

    #[test]
    fn test_reload_tracks_file_presence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let store = ModelStore::with_default_loader(&config_for(&path));

        assert!(!store.load().loaded);
        write_artifact(&path);
        assert!(store.load().loaded);
        assert!(store.is_loaded());
        fs::remove_file(&path).unwrap();
        assert!(!store.load().loaded);
        assert!(!store.is_loaded());
    }

    #[test]
    fn test_in_flight_handle_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        write_artifact(&path);
        let store = ModelStore::with_default_loader(&config_for(&path));
        store.load();

        let held = store.current().unwrap();
        fs::remove_file(&path).unwrap();
        store.load();

        assert!(store.current().is_none());
        assert_eq!(held.predict("ሰላም").unwrap(), "ሰላም ነው");
    }

    #[test]
    fn test_candidates_used_without_override() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");
        write_artifact(&second);

        let config = ServiceConfig {
            candidate_paths: vec![first.clone(), second.clone()],
            ..ServiceConfig::default()
        };
        let store = ModelStore::with_default_loader(&config);
        assert_eq!(store.resolve_path(), second);
        assert!(store.override_path().is_none());

        let outcome = store.load();
        assert!(outcome.loaded);
        assert_eq!(outcome.path, second);
    }
}
