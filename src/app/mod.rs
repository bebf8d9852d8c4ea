//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (TaggedItem, Settings, Messages)
//! - `controllers/` - Orchestration (results list)
//! - `services/` - Business operations (registry, record format, query, viewer)
//! - `infrastructure/` - External integrations (platform, error)
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use domain::{AppSettings, ItemDraft, ItemId, ItemUpdate, Message, TaggedItem, ThemeMode};
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::platform::detect_system_dark_mode;
pub use services::query::Query;
pub use services::registry::{LoadWarning, LoadWarningKind, Registry};
