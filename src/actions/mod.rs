//! Selection-aware composite operations — the core engine
//!
//! Each action takes the acting user id, mutates the document, and repairs
//! **every** user's selection (including the actor's) in the same
//! transaction, so all selections keep pointing at the semantically correct
//! location after the mutation.
//!
//! Actions follow a fixed pipeline: guard preconditions (silent no-op on
//! any miss), apply the raw mutation via `transformation`, then run a pure
//! per-user selection transform over the `users` map. The transform rules
//! and their tie-breaks are the correctness-critical part of this crate:
//! wrong logic here silently corrupts another user's cursor without
//! crashing.

pub mod items;
pub mod postprocess;
pub mod text;

pub use items::{indent, merge_with_previous, outdent, remove_items, replace_item, split_item};
pub use postprocess::normalize_runs;
pub use text::{insert_text, remove_char, remove_text};
