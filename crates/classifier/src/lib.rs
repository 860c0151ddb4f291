//! Learned Classifier Boundary
//!
//! A detector optionally fuses its rule scores through a pretrained
//! classifier. Absence of a classifier is a permanent, fully functional
//! mode chosen at construction, never a fallback-on-error path.

mod onnx;

pub use onnx::OnnxClassifier;

use thiserror::Error;

/// Classifier error types
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("model loading failed: {0}")]
    ModelLoad(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("expected {expected} input features, got {actual}")]
    FeatureShape { expected: usize, actual: usize },

    #[error("model produced no outputs")]
    EmptyOutput,
}

/// A pretrained classifier over a fixed-shape feature array.
///
/// `predict` returns at least one value; the first is the primary score,
/// any further values are per-category scores.
pub trait Classifier: Send {
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError>;
}
