use autoprice::{
    CarInput, FeatureVector, FuelType, PredictorError, PriceModel, PricePredictor, SellerType,
    Transmission,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Records every feature vector it is handed and returns a fixed price.
struct RecordingModel {
    output: f64,
    calls: AtomicUsize,
}

impl RecordingModel {
    fn new(output: f64) -> Self {
        Self {
            output,
            calls: AtomicUsize::new(0),
        }
    }
}

impl PriceModel for RecordingModel {
    fn run(&self, _features: &FeatureVector) -> Result<f64, PredictorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.output)
    }
}

fn stub_predictor(output: f64) -> (PricePredictor, Arc<RecordingModel>) {
    let model = Arc::new(RecordingModel::new(output));
    let predictor = PricePredictor::builder()
        .with_model_backend(model.clone())
        .build()
        .unwrap();
    (predictor, model)
}

#[test]
fn test_encoding_table_exact_codes() {
    assert_eq!(FuelType::from_label("Diesel").unwrap().code(), 1);
    assert_eq!(FuelType::from_label("Electric").unwrap().code(), 5);
    assert_eq!(SellerType::from_label("Trustmark Dealer").unwrap().code(), 3);
    assert_eq!(Transmission::from_label("Automatic").unwrap().code(), 2);
}

#[test]
fn test_end_to_end_feature_vector() {
    let input = CarInput::new("Diesel", 1500, "Manual", 5, "Dealer");
    let vector = input.encode().unwrap();
    assert_eq!(vector.as_slice(), &[1500.0, 5.0, 1.0, 1.0, 1.0]);
}

#[test]
fn test_end_to_end_success_message_path() {
    let (predictor, model) = stub_predictor(527654.239);
    let input = CarInput::new("Diesel", 1500, "Manual", 5, "Dealer");

    let prediction = predictor.predict(&input).unwrap();
    assert_eq!(prediction.rounded(), 527654.24);
    assert_eq!(format!("{}", prediction), "527654.24");
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unknown_fuel_type_never_reaches_model() {
    let (predictor, model) = stub_predictor(1000.0);
    let input = CarInput::new("Hydrogen", 1500, "Manual", 5, "Dealer");

    match predictor.predict(&input).unwrap_err() {
        PredictorError::EncodingError { field, value } => {
            assert_eq!(field, "fuel_type");
            assert_eq!(value, "Hydrogen");
        }
        other => panic!("expected EncodingError, got {:?}", other),
    }
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_unknown_seller_and_transmission_rejected() {
    let (predictor, model) = stub_predictor(1000.0);

    let input = CarInput::new("Diesel", 1500, "Tiptronic", 5, "Dealer");
    match predictor.predict(&input).unwrap_err() {
        PredictorError::EncodingError { field, value } => {
            assert_eq!(field, "transmission_type");
            assert_eq!(value, "Tiptronic");
        }
        other => panic!("expected EncodingError, got {:?}", other),
    }

    let input = CarInput::new("Diesel", 1500, "Manual", 5, "Broker");
    match predictor.predict(&input).unwrap_err() {
        PredictorError::EncodingError { field, value } => {
            assert_eq!(field, "seller_type");
            assert_eq!(value, "Broker");
        }
        other => panic!("expected EncodingError, got {:?}", other),
    }

    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_all_valid_combinations_predict() {
    let (predictor, _model) = stub_predictor(250000.0);

    for fuel in FuelType::ALL {
        for transmission in Transmission::ALL {
            for seller in SellerType::ALL {
                for seats in autoprice::SEAT_OPTIONS {
                    for engine in [500u32, 1500, 5000] {
                        let input = CarInput::new(
                            fuel.label(),
                            engine,
                            transmission.label(),
                            seats,
                            seller.label(),
                        );
                        let prediction = predictor.predict(&input).unwrap();
                        assert!(prediction.value().is_finite());
                    }
                }
            }
        }
    }
}

#[test]
fn test_engine_boundaries() {
    let (predictor, _model) = stub_predictor(1000.0);

    assert!(predictor
        .predict(&CarInput::new("Diesel", 500, "Manual", 5, "Dealer"))
        .is_ok());
    assert!(predictor
        .predict(&CarInput::new("Diesel", 5000, "Manual", 5, "Dealer"))
        .is_ok());
    assert!(predictor
        .predict(&CarInput::new("Diesel", 499, "Manual", 5, "Dealer"))
        .is_err());
    assert!(predictor
        .predict(&CarInput::new("Diesel", 5001, "Manual", 5, "Dealer"))
        .is_err());
}

#[test]
fn test_determinism() {
    let (predictor, _model) = stub_predictor(812345.678);
    let input = CarInput::new("Electric", 3000, "Automatic", 7, "Trustmark Dealer");

    let first = predictor.predict(&input).unwrap();
    let second = predictor.predict(&input).unwrap();
    assert_eq!(first.value().to_bits(), second.value().to_bits());
}
