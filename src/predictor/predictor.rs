use log::debug;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::error::PredictorError;
use super::features::{CarInput, FuelType, SellerType, Transmission, SEAT_OPTIONS};
use super::model::PriceModel;
use crate::models::ModelCharacteristics;

/// A single predicted sale price.
///
/// `value()` keeps the model's full precision for programmatic reuse;
/// `rounded()` and the `Display` impl are the two-decimal form meant for
/// presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePrediction {
    value: f64,
}

impl PricePrediction {
    pub(crate) fn new(value: f64) -> Self {
        Self { value }
    }

    /// Full-precision predicted price
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Predicted price rounded to 2 decimal places for display
    pub fn rounded(&self) -> f64 {
        (self.value * 100.0).round() / 100.0
    }
}

impl fmt::Display for PricePrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}

/// A used-car price predictor backed by a previously trained regression
/// model.
///
/// Each prediction is a pure, single-shot transformation: validate and
/// encode the five raw attributes, run the cached model on the resulting
/// feature vector, and return the scalar. The model handle is loaded once
/// at build time and shared read-only afterwards.
///
/// # Thread Safety
///
/// This type is `Send + Sync`: the backing model is behind `Arc` and is
/// never mutated after construction, so a predictor can be shared across
/// threads.
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use autoprice::{PricePredictor, BuiltinModel, CarInput};
///
/// let predictor = PricePredictor::builder()
///     .with_model(BuiltinModel::Cars24)?
///     .build()?;
///
/// let input = CarInput::new("Diesel", 1500, "Manual", 5, "Dealer");
/// let prediction = predictor.predict(&input)?;
/// println!("Predicted price: {}", prediction);
/// # Ok(())
/// # }
/// ```
pub struct PricePredictor {
    pub(crate) model_path: String,
    pub(crate) model: Arc<dyn PriceModel>,
    pub(crate) characteristics: ModelCharacteristics,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<PricePredictor>();
    }
};

impl PricePredictor {
    /// Creates a new PredictorBuilder for fluent construction
    pub fn builder() -> super::builder::PredictorBuilder {
        super::builder::PredictorBuilder::new()
    }

    /// Returns information about the predictor's current state
    pub fn info(&self) -> super::PredictorInfo {
        super::PredictorInfo {
            model_path: self.model_path.clone(),
            num_features: self.characteristics.num_features,
            fuel_types: FuelType::ALL.iter().map(|v| v.label().to_string()).collect(),
            transmission_types: Transmission::ALL.iter().map(|v| v.label().to_string()).collect(),
            seller_types: SellerType::ALL.iter().map(|v| v.label().to_string()).collect(),
            seat_options: SEAT_OPTIONS.to_vec(),
        }
    }

    /// Predicts the sale price for one car.
    ///
    /// Categorical fields are validated against the encoding table before
    /// anything else; an unknown label aborts the request and the model is
    /// not invoked. A successful run returns the model's scalar output,
    /// full precision, with non-finite values rejected as inference
    /// failures.
    ///
    /// # Errors
    /// - `EncodingError` for an unrecognized fuel/transmission/seller label
    /// - `ValidationError` for out-of-range engine power or seat count
    /// - `InferenceError` if the model call fails or returns a non-finite
    ///   value
    pub fn predict(&self, input: &CarInput) -> Result<PricePrediction, PredictorError> {
        let features = input.encode()?;
        debug!("Encoded features: {:?}", features.as_slice());

        let raw = self.model.run(&features)?;
        if !raw.is_finite() {
            return Err(PredictorError::InferenceError(format!(
                "Model returned a non-finite prediction: {}",
                raw
            )));
        }

        Ok(PricePrediction::new(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NUM_FEATURES;
    use crate::predictor::features::FeatureVector;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fixed-output model double that counts invocations.
    struct StubModel {
        output: f64,
        calls: AtomicUsize,
    }

    impl StubModel {
        fn new(output: f64) -> Self {
            Self {
                output,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PriceModel for StubModel {
        fn run(&self, _features: &FeatureVector) -> Result<f64, PredictorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.output)
        }
    }

    fn stub_predictor(output: f64) -> (PricePredictor, Arc<StubModel>) {
        let stub = Arc::new(StubModel::new(output));
        let predictor = PricePredictor::builder()
            .with_model_backend(stub.clone())
            .build()
            .unwrap();
        (predictor, stub)
    }

    #[test]
    fn test_predict_success() {
        let (predictor, stub) = stub_predictor(527654.239);
        let input = CarInput::new("Diesel", 1500, "Manual", 5, "Dealer");

        let prediction = predictor.predict(&input).unwrap();
        assert_eq!(prediction.value(), 527654.239);
        assert_eq!(prediction.rounded(), 527654.24);
        assert_eq!(prediction.to_string(), "527654.24");
        assert_eq!(stub.call_count(), 1);
    }

    #[test]
    fn test_unknown_label_skips_model() {
        let (predictor, stub) = stub_predictor(1000.0);
        let input = CarInput::new("Hydrogen", 1500, "Manual", 5, "Dealer");

        let err = predictor.predict(&input).unwrap_err();
        match err {
            PredictorError::EncodingError { field, value } => {
                assert_eq!(field, "fuel_type");
                assert_eq!(value, "Hydrogen");
            }
            other => panic!("expected EncodingError, got {:?}", other),
        }
        assert_eq!(stub.call_count(), 0);
    }

    #[test]
    fn test_out_of_range_engine_skips_model() {
        let (predictor, stub) = stub_predictor(1000.0);
        let input = CarInput::new("Diesel", 400, "Manual", 5, "Dealer");

        let err = predictor.predict(&input).unwrap_err();
        assert!(matches!(err, PredictorError::ValidationError(_)));
        assert_eq!(stub.call_count(), 0);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let (predictor, _stub) = stub_predictor(812345.678);
        let input = CarInput::new("Petrol", 2000, "Automatic", 7, "Individual");

        let first = predictor.predict(&input).unwrap();
        let second = predictor.predict(&input).unwrap();
        assert_eq!(first.value(), second.value());
    }

    #[test]
    fn test_engine_boundaries_predict() {
        let (predictor, _stub) = stub_predictor(1000.0);
        for engine in [500, 5000] {
            let input = CarInput::new("Diesel", engine, "Manual", 5, "Dealer");
            assert!(predictor.predict(&input).is_ok());
        }
    }

    #[test]
    fn test_non_finite_output_rejected() {
        struct NanModel;
        impl PriceModel for NanModel {
            fn run(&self, _features: &FeatureVector) -> Result<f64, PredictorError> {
                Ok(f64::NAN)
            }
        }

        let predictor = PricePredictor::builder()
            .with_model_backend(Arc::new(NanModel))
            .build()
            .unwrap();
        let input = CarInput::new("Diesel", 1500, "Manual", 5, "Dealer");
        let err = predictor.predict(&input).unwrap_err();
        assert!(matches!(err, PredictorError::InferenceError(_)));
    }

    #[test]
    fn test_negative_output_passes_through() {
        // The model is authoritative over sign; callers range-check if they
        // need to.
        let (predictor, _stub) = stub_predictor(-42.5);
        let input = CarInput::new("Diesel", 1500, "Manual", 5, "Dealer");
        let prediction = predictor.predict(&input).unwrap();
        assert_eq!(prediction.rounded(), -42.5);
    }

    #[test]
    fn test_predictor_info() {
        let (predictor, _stub) = stub_predictor(1000.0);
        let info = predictor.info();
        assert_eq!(info.num_features, NUM_FEATURES);
        assert_eq!(info.fuel_types.len(), 5);
        assert_eq!(info.transmission_types.len(), 2);
        assert_eq!(info.seller_types.len(), 3);
        assert_eq!(info.seat_options, vec![4, 5, 7, 9, 11]);
    }
}
