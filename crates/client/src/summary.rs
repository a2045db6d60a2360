//! Aggregate figures printed after a batch prediction.

use turbine_core::risk::RiskLevel;

use crate::api::BatchItem;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatchStats {
    /// Mean failure probability; `0.0` for an empty batch.
    pub average_probability: f64,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub predicted_failures: usize,
}

impl BatchStats {
    pub fn from_items(items: &[BatchItem]) -> Self {
        let mut stats = Self::default();
        if items.is_empty() {
            return stats;
        }

        let mut total = 0.0;
        for item in items {
            total += item.probability_of_failure;
            match item.risk_level {
                RiskLevel::High => stats.high += 1,
                RiskLevel::Medium => stats.medium += 1,
                RiskLevel::Low => stats.low += 1,
            }
            if item.will_fail {
                stats.predicted_failures += 1;
            }
        }
        stats.average_probability = total / items.len() as f64;
        stats
    }
}
