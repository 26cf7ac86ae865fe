//! Outline Editor WASM API
//!
//! This module provides the JavaScript-facing API for the outline editor.
//! It includes shared utilities for serialization and error handling, and
//! one exported function per editing intent.
//!
//! # Module Structure
//!
//! - `helpers`: serialization/deserialization and boundary error handling
//! - `editing`: snapshot bootstrap plus the editing usecases

pub mod editing;
pub mod helpers;

// Re-export all public functions to keep a flat JS-facing API
pub use editing::*;
pub use helpers::ApiError;
