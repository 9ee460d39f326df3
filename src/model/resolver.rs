//! Model artifact path resolution.

use std::path::{Path, PathBuf};

use crate::config::DEFAULT_MODEL_FILE;

/// Pick the artifact path to load.
///
/// An override is returned as-is, without checking that it exists. Otherwise
/// the first existing candidate wins. When no candidate exists the first one
/// is returned anyway, so the missing file is reported by the loader.
pub fn resolve_model_path(override_path: Option<&Path>, candidates: &[PathBuf]) -> PathBuf {
    if let Some(path) = override_path {
        return path.to_path_buf();
    }

    candidates
        .iter()
        .find(|candidate| candidate.exists())
        .or_else(|| candidates.first())
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_FILE))
}
