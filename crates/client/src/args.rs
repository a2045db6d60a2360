//! Command-line arguments of `turbine-cli`.

use clap::{Args, Parser, Subcommand};
use turbine_core::error::ValidationError;
use turbine_core::reading::SensorReading;

use crate::api::DEFAULT_API_URL;

/// Default turbine identifier for `predict-7days`.
pub const DEFAULT_TURBINE_ID: &str = "WIND-001";

#[derive(Debug, Parser)]
#[command(
    name = "turbine-cli",
    version,
    about = "Command-line client for the turbine failure-risk API",
    after_help = "EXAMPLES:\n  \
        turbine-cli health\n  \
        turbine-cli predict --wind-speed 12.5 --vibration 4.2 --temperature 28 --power 850 --maintenance 0\n  \
        turbine-cli predict-7days --turbine-id WIND-001 --wind-speed 10 --vibration 3 --temperature 25 --power 700 --maintenance 0"
)]
pub struct Cli {
    /// API token
    #[arg(long, global = true, env = "TURBINE_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the API
    #[arg(long, global = true, env = "TURBINE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show service health and the endpoint directory
    Health,
    /// Describe the loaded model
    ModelInfo,
    /// Score a single reading
    Predict(ReadingArgs),
    /// Score a generated seven-day series around a base reading
    #[command(name = "predict-7days")]
    Predict7days {
        /// Turbine identifier
        #[arg(long, default_value = DEFAULT_TURBINE_ID)]
        turbine_id: String,

        #[command(flatten)]
        reading: ReadingArgs,
    },
}

/// Sensor values as given on the command line, before range checks.
#[derive(Debug, Clone, Copy, PartialEq, Args)]
pub struct ReadingArgs {
    /// Wind speed in m/s
    #[arg(long, allow_negative_numbers = true)]
    pub wind_speed: f64,

    /// Vibration level
    #[arg(long = "vibration", allow_negative_numbers = true)]
    pub vibration_level: f64,

    /// Temperature in °C
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: f64,

    /// Power output in kW
    #[arg(long = "power", allow_negative_numbers = true)]
    pub power_output: f64,

    /// Recent maintenance (0 or 1)
    #[arg(long = "maintenance")]
    pub maintenance_done: u8,
}

impl TryFrom<ReadingArgs> for SensorReading {
    type Error = ValidationError;

    fn try_from(args: ReadingArgs) -> Result<Self, Self::Error> {
        SensorReading::new(
            args.wind_speed,
            args.vibration_level,
            args.temperature,
            args.power_output,
            args.maintenance_done,
        )
    }
}
