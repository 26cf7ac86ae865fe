//! Replica snapshot: document plus every user's selection
//!
//! One `EditorState` is one replica's complete view: the shared document and
//! the full per-user selection map. Actions mutate a snapshot in place; the
//! replication layer diffs and merges whole snapshots.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::core::Document;
use crate::models::selection::Selection;

/// One replica's in-memory state (document + all known users' selections)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EditorState {
    /// The shared document
    pub document: Document,

    /// Selections keyed by user id. BTreeMap keeps serialization order
    /// deterministic across replicas.
    pub users: BTreeMap<String, Selection>,
}

impl EditorState {
    /// Create a new state around a document, with no users yet
    pub fn new(document: Document) -> Self {
        Self {
            document,
            users: BTreeMap::new(),
        }
    }

    /// Register a user, pointing their selection at the document's first
    /// item. Re-adding an existing user leaves their selection untouched.
    pub fn add_user(&mut self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        if self.users.contains_key(&user_id) {
            return;
        }
        let selection = match self.document.items.first() {
            Some(first) => Selection::on_item(first.id.clone()),
            None => Selection::empty(),
        };
        self.users.insert(user_id, selection);
    }

    /// A user's selection
    pub fn selection(&self, user_id: &str) -> Option<&Selection> {
        self.users.get(user_id)
    }

    /// A user's selection, mutable
    pub fn selection_mut(&mut self, user_id: &str) -> Option<&mut Selection> {
        self.users.get_mut(user_id)
    }
}
