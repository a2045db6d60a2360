//! `turbine-cli` -- command-line client for the turbine failure-risk API.
//!
//! # Environment variables
//!
//! | Variable            | Required | Default                     | Description                      |
//! |---------------------|----------|-----------------------------|----------------------------------|
//! | `TURBINE_API_URL`   | no       | `http://localhost:5000/api` | Base URL when `--api-url` is absent |
//! | `TURBINE_API_TOKEN` | no       | --                          | Token when `--token` is absent   |

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use turbine_client::api::{BatchReport, ClientError, TurbineApi, TurbineReading};
use turbine_client::args::{Cli, Command};
use turbine_client::forecast::seven_day_series;
use turbine_client::summary::BatchStats;
use turbine_core::error::ValidationError;
use turbine_core::reading::SensorReading;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("invalid reading: {0}")]
    Reading(#[source] ValidationError),

    #[error("could not build the forecast series: {0}")]
    Forecast(#[source] ValidationError),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "turbine_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let api = TurbineApi::new(cli.api_url, cli.token.unwrap_or_default());

    let result = match cli.command {
        Command::Health => health(&api).await,
        Command::ModelInfo => model_info(&api).await,
        Command::Predict(reading) => match SensorReading::try_from(reading) {
            Ok(reading) => predict(&api, &reading).await,
            Err(e) => Err(CliError::Reading(e)),
        },
        Command::Predict7days {
            turbine_id,
            reading,
        } => match SensorReading::try_from(reading) {
            Ok(base) => predict_seven_days(&api, &turbine_id, &base).await,
            Err(e) => Err(CliError::Reading(e)),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn health(api: &TurbineApi) -> Result<(), CliError> {
    let status = api.health().await?;

    println!("API status: {}", status.status.to_uppercase());
    println!("Model loaded: {}", if status.model_loaded { "yes" } else { "no" });
    println!("API version: {}", status.api_version);
    if let Some(metadata) = status.model_metadata {
        println!("Model version: {}", metadata.version);
    }

    println!("\nAvailable endpoints:");
    for endpoint in status.endpoints_available {
        println!(
            "  {:6} {:25} {}",
            endpoint.method, endpoint.path, endpoint.description
        );
    }
    Ok(())
}

async fn model_info(api: &TurbineApi) -> Result<(), CliError> {
    let info = api.model_info().await?;

    println!("Model: {}", info.model_name);
    println!("Version: {}", info.version);
    println!("Description: {}", info.description);
    println!("Training date: {}", info.training_date);

    println!("\nPerformance:");
    for (metric, value) in &info.performance_metrics {
        println!("  {metric}: {value}");
    }
    println!("\nInput features:");
    for feature in &info.input_features {
        println!("  {feature}");
    }
    println!("\nLimitations:");
    for limitation in &info.limitations {
        println!("  {limitation}");
    }
    Ok(())
}

async fn predict(api: &TurbineApi, reading: &SensorReading) -> Result<(), CliError> {
    println!("Input:");
    println!("  Wind speed: {} m/s", reading.wind_speed());
    println!("  Vibration level: {}", reading.vibration_level());
    println!("  Temperature: {} °C", reading.temperature());
    println!("  Power output: {} kW", reading.power_output());
    println!(
        "  Recent maintenance: {}",
        if reading.maintenance_done() { "yes" } else { "no" }
    );

    let report = api.predict(reading).await?;
    let prediction = &report.prediction;

    println!("\nResult:");
    println!("  Risk level: {}", prediction.risk_level);
    println!(
        "  Failure probability: {:.1}%",
        prediction.probability_of_failure * 100.0
    );
    println!(
        "  Failure predicted: {}",
        if prediction.will_fail { "YES" } else { "NO" }
    );
    println!("  Confidence: {:.1}%", prediction.confidence * 100.0);
    println!("  Prediction id: {}", report.prediction_id);

    println!("\nRecommendations:");
    for recommendation in &report.recommendations {
        println!("  {recommendation}");
    }
    Ok(())
}

async fn predict_seven_days(
    api: &TurbineApi,
    turbine_id: &str,
    base: &SensorReading,
) -> Result<(), CliError> {
    let series: Vec<TurbineReading> =
        seven_day_series(turbine_id, base, &mut rand::rng()).map_err(CliError::Forecast)?;

    let today = chrono::Local::now().date_naive();
    for (offset, day) in (0u64..).zip(&series) {
        let date = today + chrono::Days::new(offset);
        println!("{} ({}): generated", day.turbine_id, date.format("%d/%m/%Y"));
    }

    let report = api.batch_predict(&series).await?;
    print_batch(&report);
    Ok(())
}

fn print_batch(report: &BatchReport) {
    let summary = report.summary;
    println!(
        "\nSuccessful predictions: {}/{}",
        summary.successful, summary.total
    );
    if summary.failed > 0 {
        println!("Failures: {}", summary.failed);
        for error in report.errors.iter().flatten() {
            println!("  {error}");
        }
    }

    let stats = BatchStats::from_items(&report.predictions);
    println!("\nStatistics:");
    println!("  Average probability: {:.1}%", stats.average_probability * 100.0);
    println!("  High risk: {}", stats.high);
    println!("  Medium risk: {}", stats.medium);
    println!("  Low risk: {}", stats.low);
    println!("  Predicted failures: {}", stats.predicted_failures);

    println!("\nDetails:");
    for item in &report.predictions {
        println!(
            "  {}: {} ({:.1}%), failure {}",
            item.turbine_id,
            item.risk_level,
            item.probability_of_failure * 100.0,
            if item.will_fail { "YES" } else { "NO" }
        );
    }
}
