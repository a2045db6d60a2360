//! Sensor field names and their range rules.
//!
//! The five fields and their canonical order are fixed by the model: the
//! feature vector handed to a classifier is always laid out as
//! [`SensorField::ALL`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the five sensor fields in a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorField {
    /// Wind speed in m/s.
    WindSpeed,
    /// Vibration level (dimensionless sensor scale).
    VibrationLevel,
    /// Nacelle temperature in °C.
    Temperature,
    /// Delivered power in kW.
    PowerOutput,
    /// Whether a maintenance intervention happened recently (0/1).
    MaintenanceDone,
}

impl SensorField {
    /// Canonical field order expected by the model.
    pub const ALL: [SensorField; 5] = [
        SensorField::WindSpeed,
        SensorField::VibrationLevel,
        SensorField::Temperature,
        SensorField::PowerOutput,
        SensorField::MaintenanceDone,
    ];

    /// Wire name of the field, as used in request bodies.
    pub const fn name(self) -> &'static str {
        match self {
            SensorField::WindSpeed => "wind_speed",
            SensorField::VibrationLevel => "vibration_level",
            SensorField::Temperature => "temperature",
            SensorField::PowerOutput => "power_output",
            SensorField::MaintenanceDone => "maintenance_done",
        }
    }

    /// Position of the field in the canonical feature vector.
    pub const fn index(self) -> usize {
        match self {
            SensorField::WindSpeed => 0,
            SensorField::VibrationLevel => 1,
            SensorField::Temperature => 2,
            SensorField::PowerOutput => 3,
            SensorField::MaintenanceDone => 4,
        }
    }

    /// The range rule that applies to this field.
    pub const fn rule(self) -> RangeRule {
        match self {
            SensorField::WindSpeed => RangeRule::Between {
                min: 0.0,
                max: 50.0,
                unit: "m/s",
            },
            SensorField::VibrationLevel => RangeRule::Between {
                min: 0.0,
                max: 10.0,
                unit: "",
            },
            SensorField::Temperature => RangeRule::Between {
                min: -20.0,
                max: 60.0,
                unit: "°C",
            },
            SensorField::PowerOutput => RangeRule::Between {
                min: 0.0,
                max: 2000.0,
                unit: "kW",
            },
            SensorField::MaintenanceDone => RangeRule::OneOf(&[0.0, 1.0]),
        }
    }

    /// Wire names of all fields in canonical order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.name()).collect()
    }
}

impl fmt::Display for SensorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string does not name one of the five sensor fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sensor field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for SensorField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SensorField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A named range check applied uniformly to a numeric field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeRule {
    /// Inclusive numeric interval.
    Between {
        min: f64,
        max: f64,
        unit: &'static str,
    },
    /// The value must equal one of the listed values.
    OneOf(&'static [f64]),
}

impl RangeRule {
    /// Whether `value` satisfies the rule.
    pub fn accepts(&self, value: f64) -> bool {
        match self {
            RangeRule::Between { min, max, .. } => (*min..=*max).contains(&value),
            RangeRule::OneOf(allowed) => allowed.iter().any(|a| *a == value),
        }
    }

    /// Clamp `value` into the rule's domain.
    ///
    /// For [`RangeRule::OneOf`] the closest allowed value is returned.
    pub fn clamp(&self, value: f64) -> f64 {
        match self {
            RangeRule::Between { min, max, .. } => value.clamp(*min, *max),
            RangeRule::OneOf(allowed) => allowed
                .iter()
                .copied()
                .min_by(|a, b| (a - value).abs().total_cmp(&(b - value).abs()))
                .unwrap_or(value),
        }
    }

    /// Human-readable statement of the constraint.
    pub fn describe(&self) -> String {
        match self {
            RangeRule::Between { min, max, unit } if unit.is_empty() => {
                format!("Must be a number between {min} and {max}")
            }
            RangeRule::Between { min, max, unit } => {
                format!("Must be a number between {min} and {max} {unit}")
            }
            RangeRule::OneOf(_) => "Must be 0 (no) or 1 (yes)".to_string(),
        }
    }
}
