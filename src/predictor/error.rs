use ort::Error as OrtError;
use std::fmt;

/// Represents the different types of errors that can occur in the price predictor.
#[derive(Debug)]
pub enum PredictorError {
    /// A categorical input value has no entry in the encoding table.
    /// Carries the field name and the offending value so callers can surface
    /// both to the user.
    EncodingError { field: &'static str, value: String },
    /// A numeric input is outside its legal range or set
    ValidationError(String),
    /// Error occurred while loading or validating the regression model
    ModelError(String),
    /// Error occurred during the build phase
    BuildError(String),
    /// Error occurred while running model inference
    InferenceError(String),
}

impl fmt::Display for PredictorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EncodingError { field, value } => {
                write!(f, "Encoding error: unrecognized {} '{}'", field, value)
            }
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::ModelError(msg) => write!(f, "Model error: {}", msg),
            Self::BuildError(msg) => write!(f, "Build error: {}", msg),
            Self::InferenceError(msg) => write!(f, "Inference error: {}", msg),
        }
    }
}

impl std::error::Error for PredictorError {}

impl From<OrtError> for PredictorError {
    fn from(err: OrtError) -> Self {
        PredictorError::BuildError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_error_names_field_and_value() {
        let err = PredictorError::EncodingError {
            field: "fuel_type",
            value: "Hydrogen".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("fuel_type"));
        assert!(msg.contains("Hydrogen"));
    }

    #[test]
    fn test_error_display() {
        let err = PredictorError::ValidationError("test error".to_string());
        assert!(err.to_string().contains("Validation error"));

        let err = PredictorError::ModelError("missing file".to_string());
        assert!(err.to_string().contains("Model error"));

        let err = PredictorError::InferenceError("shape mismatch".to_string());
        assert!(err.to_string().contains("Inference error"));
    }
}
