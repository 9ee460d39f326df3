//! Model loading and lifecycle.
//!
//! - [`resolver`] — picks the artifact path from an override or candidate list
//! - [`artifact`] — the [`Predictor`] / [`ModelLoader`] seams and the JSON loader
//! - [`store`] — [`ModelStore`], the single owner of the loaded model

pub mod artifact;
pub mod resolver;
pub mod store;

pub use artifact::{ModelLoader, Predictor, ResponseTable, ResponseTableLoader};
pub use resolver::resolve_model_path;
pub use store::{LoadOutcome, LoadedModel, ModelStatus, ModelStore};
