//! Controllers layer - orchestration between the registry and the widgets.
//!
//! - Results list rendering and row to item id mapping

pub mod results;
