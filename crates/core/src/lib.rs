//! Domain logic for turbine failure-risk inference.
//!
//! Everything here is pure and free of HTTP concerns: field rules and input
//! validation, feature assembly, the classifier abstraction and the bundled
//! forest model, risk banding, response assembly and batch orchestration.

pub mod batch;
pub mod classifier;
pub mod error;
pub mod features;
pub mod fields;
pub mod forest;
pub mod hashing;
pub mod model;
pub mod prediction;
pub mod reading;
pub mod risk;
pub mod types;
pub mod validation;
