//! A used-car price prediction library backed by ONNX regression models.
//!
//! The predictor takes five raw car attributes, validates the categorical
//! ones against a fixed encoding table, assembles a fixed-order feature
//! vector, and runs a previously trained regression model to produce the
//! predicted sale price. Unknown category labels are rejected with the
//! offending field and value named, never silently mapped to a fallback.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use autoprice::{PricePredictor, BuiltinModel, CarInput};
//!
//! let predictor = PricePredictor::builder()
//!     .with_model(BuiltinModel::Cars24)?
//!     .build()?;
//!
//! let input = CarInput::new("Diesel", 1500, "Manual", 5, "Dealer");
//! let prediction = predictor.predict(&input)?;
//! println!("Predicted price: {}", prediction);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The predictor is thread-safe and can be shared across threads using
//! `Arc`: the backing model is loaded once at build time and never mutated
//! afterwards.
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use autoprice::{PricePredictor, BuiltinModel, CarInput};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let predictor = Arc::new(PricePredictor::builder()
//!     .with_model(BuiltinModel::Cars24)?
//!     .build()?);
//!
//! let mut handles = vec![];
//! for _ in 0..3 {
//!     let predictor = Arc::clone(&predictor);
//!     handles.push(thread::spawn(move || {
//!         let input = CarInput::new("Petrol", 2000, "Automatic", 5, "Individual");
//!         predictor.predict(&input).unwrap();
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! # Ok(())
//! # }
//! ```

pub mod predictor;
mod runtime;
pub mod model_manager;
pub mod models;

pub use predictor::{
    allowed_labels, CarInput, FeatureVector, FuelType, PredictorBuilder, PredictorError,
    PredictorInfo, PriceModel, PricePrediction, PricePredictor, SellerType, Transmission,
    ENGINE_HP_MAX, ENGINE_HP_MIN, SEAT_OPTIONS,
};
pub use runtime::{create_session_builder, RuntimeConfig};
pub use model_manager::{ModelError, ModelManager};
pub use models::{BuiltinModel, ModelCharacteristics, ModelInfo, NUM_FEATURES};

pub fn init_logger() {
    env_logger::init();
}
