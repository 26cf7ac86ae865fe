//! Collaborative Outline Editor WASM Module
//!
//! This is the selection-consistent mutation engine of a collaborative
//! outline editor: a flat-item document model plus the algorithms that
//! mutate it and simultaneously recompute every user's selection. The JS
//! shell drives it through the `api` module; the replication layer consumes
//! snapshots through the `sync` seam.

pub mod actions;
pub mod api;
pub mod models;
pub mod sync;
pub mod transformation;
pub mod traversal;
pub mod usecases;
pub mod utils;

// Re-export commonly used types
pub use models::core::*;
pub use models::editor_state::EditorState;
pub use models::selection::*;
pub use usecases::Usecases;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(feature = "console_log")]
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Outline Editor WASM module initialized");
}
