//! Domain layer - core data structures and types.
//!
//! - Tagged items, their ids and the edit types built around them
//! - Application settings
//! - Message types for the event system

pub mod item;
pub mod messages;
pub mod settings;

pub use item::{ItemDraft, ItemId, ItemUpdate, TaggedItem};
pub use messages::Message;
pub use settings::{AppSettings, ThemeMode};
