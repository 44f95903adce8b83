//! Utility functions shared across layers.
//!
//! - [`db_error`] - Datastore error classification
//! - [`request_origin`] - Scheme/host extraction from HTTP requests

pub mod db_error;
pub mod request_origin;
