//! Fraud Scoring - Model Trainer
//!
//! Acquires the labeled dataset, fits the random forest, prints the
//! held-out report and writes the model artifact.

use anyhow::Context;

use fraud_core::logic::dataset::{acquire, load_csv_file};
use fraud_core::{constants, train, TrainingConfig};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    log::info!("Fraud trainer v{}", constants::APP_VERSION);

    let config = TrainingConfig::from_env();
    log::debug!("Training config: {:?}", config);

    let dataset_path = acquire(&config.dataset).context("Dataset acquisition failed")?;
    let dataset = load_csv_file(&dataset_path)
        .with_context(|| format!("Failed to load {}", dataset_path.display()))?;

    let outcome = train(&dataset, &config).context("Training failed")?;

    println!("\nClassification Report:\n");
    println!("{}", outcome.report);

    outcome
        .artifact
        .save(&config.model_path)
        .with_context(|| format!("Failed to save model to {}", config.model_path.display()))?;

    println!("Model saved as {}", config.model_path.display());
    Ok(())
}
