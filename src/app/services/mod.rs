//! Services layer - business operations.
//!
//! - The tag registry and its flat-file record format
//! - Tag query evaluation
//! - Launching the external document viewer

pub mod query;
pub mod record_format;
pub mod registry;
pub mod viewer;
