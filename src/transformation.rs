//! Selection-unaware mutation primitives
//!
//! Raw splices on the flat item array and on run text. Nothing in this
//! module looks at selections; the actions layer composes these primitives
//! and repairs every user's selection in the same transaction.
//!
//! All structural operations preserve the indent invariant: hierarchy is
//! encoded purely by indent levels, so "reparenting" is an indent shift over
//! a contiguous block of items.

use std::collections::BTreeSet;

use crate::models::core::{Document, InlineRun, Item, ItemKind};
use crate::models::factory;
use crate::traversal::{item_index, parent_index, subtree_end};
use crate::utils::text::{byte_index, char_len};

/// Insert `item` as the last child of `parent_id`: indent one deeper than
/// the parent, placed immediately after the parent's last descendant.
/// No-op if the parent is missing.
pub fn append_item(document: &mut Document, parent_id: &str, mut item: Item) {
    let Some(parent) = item_index(document, parent_id) else {
        return;
    };
    item.indent = document.items[parent].indent + 1;
    let at = subtree_end(document, parent);
    document.items.insert(at, item);
}

/// Insert `item` directly after `sibling_id` at the sibling's indent.
/// No-op if the sibling is missing.
pub fn insert_after(document: &mut Document, sibling_id: &str, mut item: Item) {
    let Some(sibling) = item_index(document, sibling_id) else {
        return;
    };
    item.indent = document.items[sibling].indent;
    document.items.insert(sibling + 1, item);
}

/// Splice an item out of the sequence. Descendants' indents are left
/// untouched; their parent becomes whatever item now precedes them with a
/// lower indent.
pub fn remove_item(document: &mut Document, id: &str) -> Option<Item> {
    let index = item_index(document, id)?;
    Some(document.items.remove(index))
}

/// Reparent the item (and its whole descendant block) under its upper
/// neighbor by incrementing indents. The block already follows the previous
/// item's subtree in the flat encoding, so no move is needed. No-op without
/// an upper neighbor.
pub fn indent_item(document: &mut Document, id: &str) {
    let Some(index) = item_index(document, id) else {
        return;
    };
    if index == 0 {
        return;
    }
    let end = subtree_end(document, index);
    for item in &mut document.items[index..end] {
        item.indent += 1;
    }
}

/// Inverse of [`indent_item`]: shift the item and its descendant block one
/// level up. No-op at the document root (no parent).
pub fn outdent_item(document: &mut Document, id: &str) {
    let Some(index) = item_index(document, id) else {
        return;
    };
    if parent_index(document, index).is_none() {
        return;
    }
    let end = subtree_end(document, index);
    for item in &mut document.items[index..end] {
        item.indent -= 1;
    }
}

/// Splice characters into a run at a character offset. Offsets past the end
/// are clamped.
pub fn insert_text(run: &mut InlineRun, char_offset: usize, chars: &str) {
    let at = byte_index(&run.text, char_offset);
    run.text.insert_str(at, chars);
}

/// Remove up to `count` characters starting at a character offset. Offsets
/// and counts past the end are clamped.
pub fn remove_text(run: &mut InlineRun, char_offset: usize, count: usize) {
    let len = char_len(&run.text);
    let start = char_offset.min(len);
    let end = (char_offset + count).min(len);
    if start >= end {
        return;
    }
    let from = byte_index(&run.text, start);
    let to = byte_index(&run.text, end);
    run.text.replace_range(from..to, "");
}

/// Change an item's kind.
///
/// Headings and horizontal rules cannot own nested items, so the descendant
/// block is outdented first: shifted up uniformly until its shallowest items
/// sit at the item's own indent, preserving relative depths. Horizontal
/// rules carry no inline content; converting away from one creates a single
/// empty run.
pub fn turn_into(document: &mut Document, id: &str, kind: ItemKind) {
    let Some(index) = item_index(document, id) else {
        return;
    };

    if !kind.owns_children() {
        release_descendants(document, index);
    }

    let item = &mut document.items[index];
    item.kind = kind;
    match (kind.has_inline(), item.inline.is_some()) {
        (false, _) => item.inline = None,
        (true, false) => item.inline = Some(vec![factory::run("", BTreeSet::new())]),
        (true, true) => {}
    }
}

/// Shift the descendant block of the item at `index` up so its shallowest
/// items become siblings of the item
fn release_descendants(document: &mut Document, index: usize) {
    let end = subtree_end(document, index);
    if end <= index + 1 {
        return;
    }
    let base = document.items[index].indent;
    let shallowest = document.items[index + 1..end]
        .iter()
        .map(|item| item.indent)
        .min()
        .unwrap_or(base);
    let delta = shallowest - base;
    for item in &mut document.items[index + 1..end] {
        item.indent -= delta;
    }
}
