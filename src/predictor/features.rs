use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::error::PredictorError;
use crate::models::NUM_FEATURES;

/// Field names as they appear in encoding errors and user-facing messages
pub const FUEL_TYPE_FIELD: &str = "fuel_type";
pub const TRANSMISSION_TYPE_FIELD: &str = "transmission_type";
pub const SELLER_TYPE_FIELD: &str = "seller_type";

/// Inclusive engine power range in HP
pub const ENGINE_HP_MIN: u32 = 500;
pub const ENGINE_HP_MAX: u32 = 5000;

/// Seat counts the training data covers
pub const SEAT_OPTIONS: [u8; 5] = [4, 5, 7, 9, 11];

/// Fuel type of a listed car.
///
/// The integer codes are the ones the regression model was trained with;
/// they must never change independently of the model artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelType {
    Diesel,
    Petrol,
    Cng,
    Lpg,
    Electric,
}

impl FuelType {
    pub const ALL: [FuelType; 5] = [
        FuelType::Diesel,
        FuelType::Petrol,
        FuelType::Cng,
        FuelType::Lpg,
        FuelType::Electric,
    ];

    pub fn code(&self) -> u8 {
        match self {
            FuelType::Diesel => 1,
            FuelType::Petrol => 2,
            FuelType::Cng => 3,
            FuelType::Lpg => 4,
            FuelType::Electric => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FuelType::Diesel => "Diesel",
            FuelType::Petrol => "Petrol",
            FuelType::Cng => "CNG",
            FuelType::Lpg => "LPG",
            FuelType::Electric => "Electric",
        }
    }

    /// Resolves a raw label against the encoding table. Unknown labels are
    /// rejected, never mapped to a fallback code.
    pub fn from_label(value: &str) -> Result<Self, PredictorError> {
        Self::ALL
            .iter()
            .find(|v| v.label() == value)
            .copied()
            .ok_or_else(|| PredictorError::EncodingError {
                field: FUEL_TYPE_FIELD,
                value: value.to_string(),
            })
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Transmission type of a listed car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transmission {
    Manual,
    Automatic,
}

impl Transmission {
    pub const ALL: [Transmission; 2] = [Transmission::Manual, Transmission::Automatic];

    pub fn code(&self) -> u8 {
        match self {
            Transmission::Manual => 1,
            Transmission::Automatic => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Transmission::Manual => "Manual",
            Transmission::Automatic => "Automatic",
        }
    }

    pub fn from_label(value: &str) -> Result<Self, PredictorError> {
        Self::ALL
            .iter()
            .find(|v| v.label() == value)
            .copied()
            .ok_or_else(|| PredictorError::EncodingError {
                field: TRANSMISSION_TYPE_FIELD,
                value: value.to_string(),
            })
    }
}

impl fmt::Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Seller type of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SellerType {
    Dealer,
    Individual,
    TrustmarkDealer,
}

impl SellerType {
    pub const ALL: [SellerType; 3] = [
        SellerType::Dealer,
        SellerType::Individual,
        SellerType::TrustmarkDealer,
    ];

    pub fn code(&self) -> u8 {
        match self {
            SellerType::Dealer => 1,
            SellerType::Individual => 2,
            SellerType::TrustmarkDealer => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SellerType::Dealer => "Dealer",
            SellerType::Individual => "Individual",
            SellerType::TrustmarkDealer => "Trustmark Dealer",
        }
    }

    pub fn from_label(value: &str) -> Result<Self, PredictorError> {
        Self::ALL
            .iter()
            .find(|v| v.label() == value)
            .copied()
            .ok_or_else(|| PredictorError::EncodingError {
                field: SELLER_TYPE_FIELD,
                value: value.to_string(),
            })
    }
}

impl fmt::Display for SellerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

lazy_static! {
    /// Read-only label -> code view of the categorical encodings, keyed by
    /// field name. Derived from the enums above; used for help text and
    /// error reporting, never for the encoding itself.
    pub static ref ENCODING_TABLE: HashMap<&'static str, Vec<(&'static str, u8)>> = {
        let mut table = HashMap::new();
        table.insert(
            FUEL_TYPE_FIELD,
            FuelType::ALL.iter().map(|v| (v.label(), v.code())).collect(),
        );
        table.insert(
            TRANSMISSION_TYPE_FIELD,
            Transmission::ALL.iter().map(|v| (v.label(), v.code())).collect(),
        );
        table.insert(
            SELLER_TYPE_FIELD,
            SellerType::ALL.iter().map(|v| (v.label(), v.code())).collect(),
        );
        table
    };
}

/// Returns the labels accepted for a categorical field, if it is one.
pub fn allowed_labels(field: &str) -> Option<Vec<&'static str>> {
    ENCODING_TABLE
        .get(field)
        .map(|entries| entries.iter().map(|(label, _)| *label).collect())
}

/// The five raw attributes of a prediction request.
///
/// Categorical fields are carried as text exactly as the caller supplied
/// them; the predictor validates them against the encoding table and does
/// not trust upstream widgets to have restricted the choices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarInput {
    pub fuel_type: String,
    pub engine_hp: u32,
    pub transmission_type: String,
    pub seats: u8,
    pub seller_type: String,
}

impl CarInput {
    pub fn new(
        fuel_type: impl Into<String>,
        engine_hp: u32,
        transmission_type: impl Into<String>,
        seats: u8,
        seller_type: impl Into<String>,
    ) -> Self {
        Self {
            fuel_type: fuel_type.into(),
            engine_hp,
            transmission_type: transmission_type.into(),
            seats,
            seller_type: seller_type.into(),
        }
    }

    /// Validates and encodes the input into the fixed-order feature vector.
    ///
    /// Categorical fields are resolved first, in declaration order; the
    /// first unknown label aborts the encoding so no partial vector is ever
    /// produced. Numeric fields are then range-checked.
    ///
    /// # Errors
    /// - `EncodingError` naming the field and value for an unknown label
    /// - `ValidationError` for engine power outside [500, 5000] or a seat
    ///   count outside {4, 5, 7, 9, 11}
    pub fn encode(&self) -> Result<FeatureVector, PredictorError> {
        let fuel = FuelType::from_label(&self.fuel_type)?;
        let transmission = Transmission::from_label(&self.transmission_type)?;
        let seller = SellerType::from_label(&self.seller_type)?;

        if !(ENGINE_HP_MIN..=ENGINE_HP_MAX).contains(&self.engine_hp) {
            return Err(PredictorError::ValidationError(format!(
                "Engine power must be between {} and {} HP, got {}",
                ENGINE_HP_MIN, ENGINE_HP_MAX, self.engine_hp
            )));
        }
        if !SEAT_OPTIONS.contains(&self.seats) {
            return Err(PredictorError::ValidationError(format!(
                "Seat count must be one of {:?}, got {}",
                SEAT_OPTIONS, self.seats
            )));
        }

        Ok(FeatureVector([
            self.engine_hp as f32,
            self.seats as f32,
            fuel.code() as f32,
            seller.code() as f32,
            transmission.code() as f32,
        ]))
    }
}

/// Fixed-order numeric input to the regression model:
/// [engine, seats, fuel_code, seller_code, transmission_code]
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(pub(crate) [f32; NUM_FEATURES]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}
