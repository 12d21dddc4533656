//! Feedback Portal Backend Library
//!
//! Exposes core modules for use by binaries and tests.

pub mod auth;
pub mod feedback;
pub mod middleware;
pub mod routes;
