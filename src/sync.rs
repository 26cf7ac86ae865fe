//! Replication-layer interface
//!
//! The engine never resolves concurrent writes itself; it consumes the
//! merge layer through this seam. A store applies a pure mutation function
//! to its snapshot and later merges a remote snapshot in. Selection fields
//! written by the acting replica are carried verbatim through the merge,
//! never recomputed by the receiver — the engine adjusts all known users'
//! selections eagerly in the same transaction as the edit.
//!
//! Caveat, deliberately left to the merge-layer contract: adjustments are
//! computed against the acting replica's current view of other users'
//! selections, which can be stale while remote selection updates are still
//! in flight. This module does not reconcile that.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::editor_state::EditorState;

/// The consumed merge-layer primitive: apply a local mutation, merge a
/// remote snapshot
pub trait SnapshotStore {
    /// Run a mutation transaction against the local snapshot and return the
    /// resulting snapshot for the replication layer to diff and ship
    fn apply_change<F>(&mut self, mutate: F) -> EditorState
    where
        F: FnOnce(&mut EditorState);

    /// Merge a remote snapshot into the local one and return the result
    fn merge_snapshots(&mut self, remote: EditorState) -> EditorState;
}

/// In-memory store used by tests and single-replica embeddings.
///
/// The merge here is a deliberately naive stand-in for the real field-level
/// CRDT merge: the remote document wins wholesale, remote user entries win
/// per user id, and local-only users are kept. It preserves the one
/// property the engine relies on — selection fields pass through verbatim.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    snapshot: EditorState,
    revision: u64,
}

impl InMemoryStore {
    pub fn new(snapshot: EditorState) -> Self {
        Self { snapshot, revision: 0 }
    }

    /// Number of local transactions applied so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The current local snapshot
    pub fn snapshot(&self) -> &EditorState {
        &self.snapshot
    }
}

impl SnapshotStore for InMemoryStore {
    fn apply_change<F>(&mut self, mutate: F) -> EditorState
    where
        F: FnOnce(&mut EditorState),
    {
        mutate(&mut self.snapshot);
        self.revision += 1;
        self.snapshot.clone()
    }

    fn merge_snapshots(&mut self, remote: EditorState) -> EditorState {
        let mut merged = remote;
        for (user_id, selection) in &self.snapshot.users {
            merged
                .users
                .entry(user_id.clone())
                .or_insert_with(|| selection.clone());
        }
        self.snapshot = merged;
        self.revision += 1;
        self.snapshot.clone()
    }
}

/// Replicated counter the merge layer maps `indent` onto.
///
/// Per-site increment/decrement tallies merged by per-site maximum, so
/// concurrent indent and outdent edits from different replicas commute:
/// merging in either order yields the same value.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PnCounter {
    increments: BTreeMap<String, u64>,
    decrements: BTreeMap<String, u64>,
}

impl PnCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one increment on behalf of a site
    pub fn increment(&mut self, site: &str) {
        *self.increments.entry(site.to_string()).or_default() += 1;
    }

    /// Record one decrement on behalf of a site
    pub fn decrement(&mut self, site: &str) {
        *self.decrements.entry(site.to_string()).or_default() += 1;
    }

    /// Current value: total increments minus total decrements
    pub fn value(&self) -> i64 {
        let up: u64 = self.increments.values().sum();
        let down: u64 = self.decrements.values().sum();
        up as i64 - down as i64
    }

    /// Merge another replica's view in: per-site maximum of each tally
    pub fn merge(&mut self, other: &PnCounter) {
        for (site, count) in &other.increments {
            let entry = self.increments.entry(site.clone()).or_default();
            *entry = (*entry).max(*count);
        }
        for (site, count) in &other.decrements {
            let entry = self.decrements.entry(site.clone()).or_default();
            *entry = (*entry).max(*count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::factory;

    #[test]
    fn test_counter_merge_commutes() {
        let mut a = PnCounter::new();
        let mut b = PnCounter::new();
        a.increment("site-a");
        a.increment("site-a");
        b.decrement("site-b");
        b.increment("site-b");

        let mut ab = a.clone();
        ab.merge(&b);
        let mut ba = b.clone();
        ba.merge(&a);

        assert_eq!(ab, ba);
        assert_eq!(ab.value(), 2);
    }

    #[test]
    fn test_counter_merge_is_idempotent() {
        let mut a = PnCounter::new();
        a.increment("site-a");
        let snapshot = a.clone();
        a.merge(&snapshot);
        assert_eq!(a.value(), 1);
    }

    #[test]
    fn test_store_carries_selections_verbatim() {
        let doc = factory::document_with_items("shared", vec![factory::paragraph("hello")]);
        let first = doc.items[0].id.clone();
        let mut state = EditorState::new(doc);
        state.add_user("alice");
        let mut store = InMemoryStore::new(state.clone());

        // remote replica knows a user this one does not
        let mut remote = state.clone();
        remote.add_user("bob");
        remote.users.get_mut("bob").unwrap().collapse_to_item(first.clone());

        let merged = store.merge_snapshots(remote);
        assert_eq!(
            merged.users["bob"].anchor.as_deref(),
            Some(first.as_str()),
            "remote selection fields must pass through the merge untouched"
        );
        assert!(merged.users.contains_key("alice"));
    }
}
