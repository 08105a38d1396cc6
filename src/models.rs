use serde::{Deserialize, Serialize};

/// Number of features the regression models consume:
/// [engine, seats, fuel_code, seller_code, transmission_code]
pub const NUM_FEATURES: usize = 5;

/// Regression models bundled with the crate.
///
/// A built-in model is identified by name under the models cache directory
/// and can be fetched and verified through [`crate::ModelManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinModel {
    /// Gradient-boosted regressor trained on the CARS24 used-car listings
    /// dataset, exported to ONNX. Expects the 5-feature input described by
    /// [`NUM_FEATURES`] and produces a single price scalar.
    Cars24,
}

/// Download and verification metadata for a model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub model_url: String,
    pub model_hash: String,
}

/// Static properties of a model relevant to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelCharacteristics {
    /// Width of the input feature vector the model expects
    pub num_features: usize,
    /// Approximate artifact size on disk
    pub model_size_mb: usize,
}

impl BuiltinModel {
    pub fn get_model_info(&self) -> ModelInfo {
        match self {
            BuiltinModel::Cars24 => ModelInfo {
                name: "cars24-regressor".to_string(),
                model_url: "https://huggingface.co/axar-ai/cars24-regressor/resolve/main/model.onnx"
                    .to_string(),
                model_hash: "578bbc66be8279f4b4acd6cf0195c6c64ba4ba66cf21c72f92f2cd8f8e60d3c7"
                    .to_string(),
            },
        }
    }

    pub fn characteristics(&self) -> ModelCharacteristics {
        match self {
            BuiltinModel::Cars24 => ModelCharacteristics {
                num_features: NUM_FEATURES,
                model_size_mb: 1,
            },
        }
    }
}
