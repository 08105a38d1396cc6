use anyhow::Context;
use autoprice::{
    allowed_labels, BuiltinModel, CarInput, ModelManager, PredictorError, PricePredictor,
};
use clap::Parser;
use log::info;
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Fuel type (Diesel, Petrol, CNG, LPG, Electric)
    #[arg(long, default_value = "Diesel")]
    fuel_type: String,

    /// Engine power in HP
    #[arg(long, default_value_t = 1500, value_parser = clap::value_parser!(u32).range(500..=5000))]
    engine: u32,

    /// Transmission type (Manual, Automatic)
    #[arg(long, default_value = "Manual")]
    transmission: String,

    /// Number of seats (4, 5, 7, 9 or 11)
    #[arg(long, default_value_t = 5)]
    seats: u8,

    /// Seller type (Dealer, Individual, Trustmark Dealer)
    #[arg(long, default_value = "Dealer")]
    seller_type: String,

    /// Path to a custom ONNX regression model instead of the built-in one
    #[arg(long)]
    model: Option<String>,

    /// Force a fresh download of the model file
    #[arg(short, long)]
    fresh: bool,

    /// Emit the prediction as JSON instead of a message
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct PredictionReport<'a> {
    input: &'a CarInput,
    price: f64,
}

async fn ensure_model_downloaded(fresh: bool) -> anyhow::Result<()> {
    let manager = ModelManager::new_default()?;
    let model = BuiltinModel::Cars24;

    if fresh {
        info!("Fresh download requested - removing any existing model file...");
        manager.remove_download(model)?;
    }

    if !manager.is_model_downloaded(model) {
        info!("Downloading model...");
        manager.download_model(model).await?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let predictor = match args.model {
        Some(ref path) => PricePredictor::builder()
            .with_custom_model(path)
            .context("failed to load custom model")?
            .build()?,
        None => {
            // Ensure the built-in model is on disk before loading it
            ensure_model_downloaded(args.fresh).await?;
            PricePredictor::builder()
                .with_model(BuiltinModel::Cars24)?
                .build()?
        }
    };

    let input = CarInput::new(
        args.fuel_type,
        args.engine,
        args.transmission,
        args.seats,
        args.seller_type,
    );
    info!("Predicting price for {:?}", input);

    match predictor.predict(&input) {
        Ok(prediction) => {
            if args.json {
                let report = PredictionReport {
                    input: &input,
                    price: prediction.rounded(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("The predicted price of the car is: ${}", prediction);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let PredictorError::EncodingError { field, .. } = &e {
                if let Some(labels) = allowed_labels(field) {
                    eprintln!("Accepted values for {}: {}", field, labels.join(", "));
                }
            }
            Err(e.into())
        }
    }
}
