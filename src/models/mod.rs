//! Models module for the outline editor
//!
//! This module contains all the data models and structures
//! used in the flat-item document system.

pub mod core;
pub mod editor_state;
pub mod factory;
pub mod selection;

// Re-export commonly used types
pub use self::core::*;
pub use editor_state::EditorState;
pub use selection::*;
