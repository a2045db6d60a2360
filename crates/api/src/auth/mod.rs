//! Authentication primitives.
//!
//! - [`tokens`] -- static bearer-token registry loaded from configuration.

pub mod tokens;
