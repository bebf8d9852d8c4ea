//! Infrastructure layer - external integrations and utilities.
//!
//! - Error types
//! - Platform detection and filesystem checks

pub mod error;
pub mod platform;
