//! Risk bander: failure probability to risk level and recommendations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Probability at or above which a turbine is [`RiskLevel::High`].
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Probability at or above which a turbine is [`RiskLevel::Medium`].
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;

/// Three-level risk category derived from the failure probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

const HIGH_RECOMMENDATIONS: &[&str] = &[
    "Intervention recommended within 48 hours",
    "Inspect critical components",
    "Prepare spare parts",
];

const MEDIUM_RECOMMENDATIONS: &[&str] = &[
    "Increased monitoring recommended",
    "Schedule a preventive intervention",
    "Review the maintenance history",
];

const LOW_RECOMMENDATIONS: &[&str] = &[
    "Normal maintenance schedule",
    "Continue standard monitoring",
];

impl RiskLevel {
    /// Band a failure probability. Boundaries belong to the higher band.
    pub fn from_probability(probability: f64) -> Self {
        if probability >= HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if probability >= MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Fixed, ordered recommendation list for the band.
    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            RiskLevel::High => HIGH_RECOMMENDATIONS,
            RiskLevel::Medium => MEDIUM_RECOMMENDATIONS,
            RiskLevel::Low => LOW_RECOMMENDATIONS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A risk band together with its recommendations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub recommendations: Vec<String>,
}

/// Band `probability` and attach the band's recommendations.
pub fn assess(probability: f64) -> RiskAssessment {
    let level = RiskLevel::from_probability(probability);
    RiskAssessment {
        level,
        recommendations: level
            .recommendations()
            .iter()
            .map(|r| r.to_string())
            .collect(),
    }
}
