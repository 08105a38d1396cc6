use ndarray::Array2;
use ort::session::Session;
use ort::value::Tensor;
use std::collections::HashMap;
use std::sync::Arc;

use super::error::PredictorError;
use super::features::FeatureVector;
use crate::models::NUM_FEATURES;

/// The regression model seam.
///
/// `PricePredictor` talks to the backing model exclusively through this
/// trait, so the ONNX session can be swapped for a stub in tests or for an
/// alternate runtime without touching the prediction pipeline.
pub trait PriceModel: Send + Sync {
    /// Runs the regression on a single feature vector and returns the raw
    /// (unrounded) predicted price.
    fn run(&self, features: &FeatureVector) -> Result<f64, PredictorError>;
}

/// ONNX-backed regression model.
///
/// The session is created once, validated, and shared read-only for the
/// lifetime of the predictor; inference never mutates it.
pub struct OnnxPriceModel {
    session: Arc<Session>,
    input_name: String,
}

impl OnnxPriceModel {
    /// Wraps a loaded session after validating its input/output structure.
    pub fn new(session: Session) -> Result<Self, PredictorError> {
        Self::validate_session(&session)?;
        let input_name = session.inputs[0].name.clone();
        Ok(Self {
            session: Arc::new(session),
            input_name,
        })
    }

    /// Validates that the model has the expected input/output structure
    fn validate_session(session: &Session) -> Result<(), PredictorError> {
        // Check inputs
        let inputs = &session.inputs;
        if inputs.len() != 1 {
            return Err(PredictorError::ModelError(format!(
                "Regression model must have exactly 1 input (the feature vector), found {}",
                inputs.len()
            )));
        }

        // Check outputs
        let outputs = &session.outputs;
        if outputs.is_empty() {
            return Err(PredictorError::ModelError(
                "Regression model must have at least 1 output for the prediction".to_string(),
            ));
        }

        Ok(())
    }
}

impl PriceModel for OnnxPriceModel {
    fn run(&self, features: &FeatureVector) -> Result<f64, PredictorError> {
        let input_array = Array2::from_shape_vec((1, NUM_FEATURES), features.as_slice().to_vec())
            .map_err(|e| {
                PredictorError::InferenceError(format!("Failed to create input array: {}", e))
            })?;
        let input_dyn = input_array.into_dyn();
        let input = input_dyn.as_standard_layout();

        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            self.input_name.as_str(),
            Tensor::from_array(&input).map_err(|e| {
                PredictorError::InferenceError(format!("Failed to create input tensor: {}", e))
            })?,
        );

        let outputs = self.session.run(input_tensors).map_err(|e| {
            PredictorError::InferenceError(format!("Failed to run model: {}", e))
        })?;
        let output_tensor = outputs[0].try_extract_tensor::<f32>().map_err(|e| {
            PredictorError::InferenceError(format!("Failed to extract output tensor: {}", e))
        })?;

        // Single-row input, single scalar out
        let price = output_tensor.iter().next().copied().ok_or_else(|| {
            PredictorError::InferenceError("Model produced an empty output".to_string())
        })?;

        Ok(price as f64)
    }
}
