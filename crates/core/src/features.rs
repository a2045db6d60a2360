//! Feature assembly: validated reading to model input vector.

use crate::error::ValidationError;
use crate::fields::SensorField;
use crate::reading::SensorReading;

/// Model input laid out in [`SensorField::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; 5]);

impl FeatureVector {
    /// Wrap raw values that are already in canonical order.
    pub fn from_raw(values: [f64; 5]) -> Self {
        Self(values)
    }

    /// Value of a single feature.
    pub fn get(&self, field: SensorField) -> f64 {
        self.0[field.index()]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Reconstruct the reading the vector was assembled from.
    pub fn to_reading(&self) -> Result<SensorReading, ValidationError> {
        SensorReading::from_values(self.0)
    }

    /// `(field, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (SensorField, f64)> + '_ {
        SensorField::ALL.into_iter().zip(self.0.iter().copied())
    }
}

/// Lay out a validated reading in the order the model expects.
pub fn assemble(reading: &SensorReading) -> FeatureVector {
    FeatureVector(SensorField::ALL.map(|field| reading.get(field)))
}

impl From<&SensorReading> for FeatureVector {
    fn from(reading: &SensorReading) -> Self {
        assemble(reading)
    }
}
