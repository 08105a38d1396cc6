use log::{error, info};
use std::sync::Arc;

use super::error::PredictorError;
use super::model::{OnnxPriceModel, PriceModel};
use super::predictor::PricePredictor;
use crate::runtime::{create_session_builder, RuntimeConfig};
use crate::{BuiltinModel, ModelCharacteristics, ModelManager};
use crate::models::NUM_FEATURES;

/// A builder for constructing a PricePredictor with a fluent interface.
#[derive(Default)]
pub struct PredictorBuilder {
    model_path: Option<String>,
    backend: Option<Arc<dyn PriceModel>>,
    characteristics: Option<ModelCharacteristics>,
    runtime_config: RuntimeConfig,
}

impl PredictorBuilder {
    /// Creates a new empty PredictorBuilder instance with default configuration
    pub fn new() -> Self {
        Self {
            model_path: None,
            backend: None,
            characteristics: None,
            runtime_config: RuntimeConfig::default(),
        }
    }

    /// Sets the runtime configuration for ONNX model execution
    ///
    /// # Example
    /// ```
    /// use autoprice::{PredictorBuilder, RuntimeConfig};
    ///
    /// let config = RuntimeConfig::default();
    /// let builder = PredictorBuilder::new()
    ///     .with_runtime_config(config);
    /// ```
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Sets the regression model using a built-in model type.
    ///
    /// The artifact must already be on disk; fetch it first with
    /// [`ModelManager::download_model`].
    ///
    /// # Returns
    /// * `Result<Self, PredictorError>` - The builder instance if successful, or an error if:
    ///   - A model is already set
    ///   - The model is not downloaded
    ///   - The model failed to load
    ///   - The model structure is invalid
    ///
    /// # Example
    /// ```no_run
    /// use autoprice::{PredictorBuilder, BuiltinModel};
    ///
    /// let builder = PredictorBuilder::new()
    ///     .with_model(BuiltinModel::Cars24);
    /// ```
    pub fn with_model(mut self, model: BuiltinModel) -> Result<Self, PredictorError> {
        if self.model_path.is_some() || self.backend.is_some() {
            return Err(PredictorError::BuildError("Model already set".to_string()));
        }

        // Initialize model manager with default location
        let manager = ModelManager::new_default().map_err(|e| {
            PredictorError::BuildError(format!("Failed to create model manager: {}", e))
        })?;

        // Check if model is downloaded
        if !manager.is_model_downloaded(model) {
            return Err(PredictorError::ModelError(format!(
                "Model '{:?}' is not downloaded. Please download it first using ModelManager::download_model()",
                model
            )));
        }

        let model_path = manager.get_model_path(model);

        // Create session using the singleton environment
        let session = create_session_builder(&self.runtime_config)?
            .commit_from_file(&model_path)
            .map_err(|e| {
                error!("Failed to load model: {}", e);
                PredictorError::ModelError(format!("Failed to load model: {}", e))
            })?;

        // Validate model structure
        let backend = OnnxPriceModel::new(session)?;
        info!("Model structure validated successfully");

        self.characteristics = Some(model.characteristics());
        self.model_path = Some(model_path.to_string_lossy().to_string());
        self.backend = Some(Arc::new(backend));
        Ok(self)
    }

    /// Sets a custom regression model path for the predictor.
    ///
    /// The artifact must be an ONNX model taking one 5-wide feature-vector
    /// input and producing a single price output.
    ///
    /// # Example
    /// ```no_run
    /// use autoprice::PredictorBuilder;
    ///
    /// let builder = PredictorBuilder::new()
    ///     .with_custom_model("path/to/model.onnx");
    /// ```
    pub fn with_custom_model(mut self, model_path: &str) -> Result<Self, PredictorError> {
        if model_path.is_empty() {
            return Err(PredictorError::BuildError(
                "Model path cannot be empty".to_string(),
            ));
        }
        if self.model_path.is_some() || self.backend.is_some() {
            return Err(PredictorError::BuildError("Model already set".to_string()));
        }

        // Validate path exists
        if !std::path::Path::new(model_path).exists() {
            return Err(PredictorError::BuildError(format!(
                "Model file not found: {}",
                model_path
            )));
        }

        // Create session using the singleton environment
        let session = create_session_builder(&self.runtime_config)?
            .commit_from_file(model_path)
            .map_err(|e| {
                error!("Failed to load model: {}", e);
                PredictorError::ModelError(format!("Failed to load model: {}", e))
            })?;

        let backend = OnnxPriceModel::new(session)?;
        info!("Model structure validated successfully");

        self.characteristics = Some(ModelCharacteristics {
            num_features: NUM_FEATURES,
            model_size_mb: 0, // Not critical for functionality
        });
        self.model_path = Some(model_path.to_string());
        self.backend = Some(Arc::new(backend));
        Ok(self)
    }

    /// Sets an already-constructed backing model.
    ///
    /// Intended for stub models in tests and for callers bringing their own
    /// inference runtime; the model is used as-is with no further
    /// validation.
    pub fn with_model_backend(mut self, backend: Arc<dyn PriceModel>) -> Self {
        self.model_path = Some("<external>".to_string());
        self.characteristics = Some(ModelCharacteristics {
            num_features: NUM_FEATURES,
            model_size_mb: 0,
        });
        self.backend = Some(backend);
        self
    }

    /// Builds and returns the final PricePredictor instance
    ///
    /// # Returns
    /// * `Result<PricePredictor, PredictorError>` - The constructed predictor if successful,
    ///   or a `BuildError` if no model has been configured
    pub fn build(mut self) -> Result<PricePredictor, PredictorError> {
        let backend = self
            .backend
            .take()
            .ok_or_else(|| PredictorError::BuildError("No model loaded".to_string()))?;
        let model_path = self
            .model_path
            .take()
            .ok_or_else(|| PredictorError::BuildError("Model path not set".to_string()))?;
        let characteristics = self
            .characteristics
            .take()
            .ok_or_else(|| PredictorError::BuildError("Model characteristics not set".to_string()))?;

        Ok(PricePredictor {
            model_path,
            model: backend,
            characteristics,
        })
    }
}
