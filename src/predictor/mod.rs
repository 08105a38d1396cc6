mod error;
mod features;
mod model;
pub mod builder;
mod predictor;

pub use builder::PredictorBuilder;
pub use error::PredictorError;
pub use features::{
    allowed_labels, CarInput, FeatureVector, FuelType, SellerType, Transmission, ENCODING_TABLE,
    ENGINE_HP_MAX, ENGINE_HP_MIN, FUEL_TYPE_FIELD, SEAT_OPTIONS, SELLER_TYPE_FIELD,
    TRANSMISSION_TYPE_FIELD,
};
pub use model::{OnnxPriceModel, PriceModel};
pub use predictor::{PricePrediction, PricePredictor};

/// Information about the current state and configuration of a predictor
#[derive(Debug, Clone)]
pub struct PredictorInfo {
    /// Path to the ONNX model file
    pub model_path: String,
    /// Width of the feature vector the model consumes
    pub num_features: usize,
    /// Accepted fuel type labels
    pub fuel_types: Vec<String>,
    /// Accepted transmission type labels
    pub transmission_types: Vec<String>,
    /// Accepted seller type labels
    pub seller_types: Vec<String>,
    /// Accepted seat counts
    pub seat_options: Vec<u8>,
}
