//! Synthetic seven-day series around a base reading.

use rand::Rng;
use turbine_core::error::ValidationError;
use turbine_core::fields::SensorField;
use turbine_core::reading::SensorReading;

use crate::api::TurbineReading;

/// Number of days in a forecast series.
pub const FORECAST_DAYS: usize = 7;

/// Maximum absolute perturbation applied to each field per day.
fn jitter(field: SensorField) -> f64 {
    match field {
        SensorField::WindSpeed => 2.0,
        SensorField::VibrationLevel => 0.5,
        SensorField::Temperature => 2.0,
        SensorField::PowerOutput => 100.0,
        SensorField::MaintenanceDone => 0.0,
    }
}

/// Build [`FORECAST_DAYS`] readings `<turbine_id>_D1..D7` by perturbing
/// `base` uniformly and clamping every value back into its valid range.
///
/// `maintenance_done` is carried over unchanged.
pub fn seven_day_series<R: Rng>(
    turbine_id: &str,
    base: &SensorReading,
    rng: &mut R,
) -> Result<Vec<TurbineReading>, ValidationError> {
    (1..=FORECAST_DAYS)
        .map(|day| {
            let mut values = [0.0; 5];
            for field in SensorField::ALL {
                let spread = jitter(field);
                let offset = if spread > 0.0 {
                    rng.random_range(-spread..=spread)
                } else {
                    0.0
                };
                values[field.index()] = field.rule().clamp(base.get(field) + offset);
            }

            Ok(TurbineReading {
                turbine_id: format!("{turbine_id}_D{day}"),
                reading: SensorReading::from_values(values)?,
            })
        })
        .collect()
}
