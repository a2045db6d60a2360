//! HTTP client and command-line front end for the turbine failure-risk API.

pub mod api;
pub mod args;
pub mod forecast;
pub mod summary;
