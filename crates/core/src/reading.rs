//! The validated sensor snapshot for one turbine.

use serde::Serialize;

use crate::error::ValidationError;
use crate::fields::SensorField;

/// One validated snapshot of the five sensor values.
///
/// Fields are private: a `SensorReading` can only be obtained through
/// [`SensorReading::new`] or the validator, so every instance satisfies the
/// range rules of [`SensorField::rule`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorReading {
    wind_speed: f64,
    vibration_level: f64,
    temperature: f64,
    power_output: f64,
    maintenance_done: u8,
}

impl SensorReading {
    /// Build a reading from typed values, checking every range rule.
    pub fn new(
        wind_speed: f64,
        vibration_level: f64,
        temperature: f64,
        power_output: f64,
        maintenance_done: u8,
    ) -> Result<Self, ValidationError> {
        Self::from_values([
            wind_speed,
            vibration_level,
            temperature,
            power_output,
            f64::from(maintenance_done),
        ])
    }

    /// Build a reading from values in canonical field order.
    pub fn from_values(values: [f64; 5]) -> Result<Self, ValidationError> {
        for field in SensorField::ALL {
            let value = values[field.index()];
            let rule = field.rule();
            if !rule.accepts(value) {
                return Err(ValidationError::InvalidRange {
                    field,
                    value: value.to_string(),
                    constraint: rule.describe(),
                });
            }
        }

        Ok(Self {
            wind_speed: values[0],
            vibration_level: values[1],
            temperature: values[2],
            power_output: values[3],
            // Only 0.0 or 1.0 pass the rule above.
            maintenance_done: values[4] as u8,
        })
    }

    pub fn wind_speed(&self) -> f64 {
        self.wind_speed
    }

    pub fn vibration_level(&self) -> f64 {
        self.vibration_level
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn power_output(&self) -> f64 {
        self.power_output
    }

    pub fn maintenance_done(&self) -> bool {
        self.maintenance_done == 1
    }

    /// Numeric value of `field`.
    pub fn get(&self, field: SensorField) -> f64 {
        match field {
            SensorField::WindSpeed => self.wind_speed,
            SensorField::VibrationLevel => self.vibration_level,
            SensorField::Temperature => self.temperature,
            SensorField::PowerOutput => self.power_output,
            SensorField::MaintenanceDone => f64::from(self.maintenance_done),
        }
    }
}
