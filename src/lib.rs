//! Tag Browser: tag PDF files with free-text labels and find them again by
//! tag expression.
//!
//! The registry and query evaluator under [`app::services`] hold all of the
//! logic; [`ui`] is the fltk shell around them.

pub mod app;
pub mod ui;
