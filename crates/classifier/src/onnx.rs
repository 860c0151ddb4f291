//! ONNX classifier backend

use std::path::Path;

use tract_onnx::prelude::*;
use tracing::info;

use crate::{Classifier, ClassifierError};

/// Classifier backed by a local ONNX model.
///
/// Expects a `[1, feature_len]` f32 input and reads the first output
/// tensor as a flat score vector. Loading happens once at construction;
/// no network or disk I/O afterwards.
pub struct OnnxClassifier {
    model: TypedSimplePlan<TypedModel>,
    feature_len: usize,
}

impl OnnxClassifier {
    /// Load an ONNX model from disk and prepare it for inference
    pub fn load<P: AsRef<Path>>(model_path: P, feature_len: usize) -> Result<Self, ClassifierError> {
        let model_path = model_path.as_ref();
        info!("loading classifier model from {}", model_path.display());

        let model = tract_onnx::onnx()
            .model_for_path(model_path)
            .map_err(|e| ClassifierError::ModelLoad(e.to_string()))?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, feature_len)),
            )
            .map_err(|e| ClassifierError::ModelLoad(e.to_string()))?
            .into_optimized()
            .map_err(|e| ClassifierError::ModelLoad(e.to_string()))?
            .into_runnable()
            .map_err(|e| ClassifierError::ModelLoad(e.to_string()))?;

        Ok(Self { model, feature_len })
    }

    /// Declared input feature length
    pub fn feature_len(&self) -> usize {
        self.feature_len
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        if features.len() != self.feature_len {
            return Err(ClassifierError::FeatureShape {
                expected: self.feature_len,
                actual: features.len(),
            });
        }

        let input = tract_ndarray::Array2::from_shape_fn((1, self.feature_len), |(_, i)| {
            features[i] as f32
        })
        .into_tensor();

        let outputs = self
            .model
            .run(tvec!(input.into()))
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let output = outputs.first().ok_or(ClassifierError::EmptyOutput)?;
        let scores = output
            .to_array_view::<f32>()
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let scores: Vec<f64> = scores.iter().map(|&v| v as f64).collect();
        if scores.is_empty() {
            return Err(ClassifierError::EmptyOutput);
        }
        Ok(scores)
    }
}
