//! Request-level middleware and extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller's role from a Bearer token.
//! - [`request_log::request_log`] -- Logs every request and feeds usage stats.

pub mod auth;
pub mod request_log;
