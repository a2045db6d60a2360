//! Input validator: raw JSON object to [`SensorReading`].
//!
//! Presence is checked for every field before any range is checked, so a
//! request that is both incomplete and out of range reports the missing
//! field. Within each pass fields are visited in canonical order.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::fields::SensorField;
use crate::reading::SensorReading;

/// Validate a raw request object and build the reading it describes.
///
/// Keys other than the five sensor fields are ignored.
pub fn validate_reading(data: &Map<String, Value>) -> Result<SensorReading, ValidationError> {
    if let Some(field) = SensorField::ALL
        .into_iter()
        .find(|f| !data.contains_key(f.name()))
    {
        return Err(ValidationError::MissingField { field });
    }

    let mut values = [0.0; 5];
    for field in SensorField::ALL {
        // Presence was established above.
        let raw = &data[field.name()];
        values[field.index()] = check_field(field, raw)?;
    }

    SensorReading::from_values(values)
}

/// Apply the field's rule to a raw JSON value, returning the accepted number.
fn check_field(field: SensorField, raw: &Value) -> Result<f64, ValidationError> {
    let rule = field.rule();
    match raw.as_f64() {
        Some(value) if rule.accepts(value) => Ok(value),
        _ => Err(ValidationError::InvalidRange {
            field,
            value: raw.to_string(),
            constraint: rule.describe(),
        }),
    }
}

/// Keep only the five sensor fields of a raw object.
pub fn sensor_fields_only(data: &Map<String, Value>) -> Map<String, Value> {
    SensorField::ALL
        .into_iter()
        .filter_map(|f| data.get(f.name()).map(|v| (f.name().to_string(), v.clone())))
        .collect()
}
