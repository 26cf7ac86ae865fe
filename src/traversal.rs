//! Read-only queries over the flat item array and per-item run lists
//!
//! Pure lookups with no side effects. Every operation returns `None` on a
//! miss; callers treat "not found" as a no-op, never as an error. Several
//! legitimate races (an item deleted by a concurrent remote edit) rely on
//! missed lookups staying silent.

use crate::models::core::{Document, InlineRun, Item};
use crate::models::selection::Selection;

/// Find an item by id
pub fn find_item<'a>(document: &'a Document, id: &str) -> Option<&'a Item> {
    document.items.iter().find(|item| item.id == id)
}

/// Find an item by id, mutable
pub fn find_item_mut<'a>(document: &'a mut Document, id: &str) -> Option<&'a mut Item> {
    document.items.iter_mut().find(|item| item.id == id)
}

/// Index of an item in document order
pub fn item_index(document: &Document, id: &str) -> Option<usize> {
    document.items.iter().position(|item| item.id == id)
}

/// The item the selection's anchor points at
pub fn find_current_item<'a>(document: &'a Document, selection: &Selection) -> Option<&'a Item> {
    find_item(document, selection.anchor.as_deref()?)
}

/// Inclusive index span between a selection's anchor and focus, normalized
/// to document order (lo <= hi even for a "backwards" selection)
pub fn current_item_indices(document: &Document, selection: &Selection) -> Option<(usize, usize)> {
    let anchor = item_index(document, selection.anchor.as_deref()?)?;
    let focus = item_index(document, selection.focus.as_deref()?)?;
    Some((anchor.min(focus), anchor.max(focus)))
}

/// The inclusive document-order slice of items between a selection's anchor
/// and focus
pub fn find_current_items<'a>(document: &'a Document, selection: &Selection) -> Vec<&'a Item> {
    match current_item_indices(document, selection) {
        Some((lo, hi)) => document.items[lo..=hi].iter().collect(),
        None => Vec::new(),
    }
}

/// Find a run inside an item
pub fn find_run<'a>(document: &'a Document, item_id: &str, run_id: &str) -> Option<&'a InlineRun> {
    find_item(document, item_id)?.runs().iter().find(|r| r.id == run_id)
}

/// Find a run inside an item, mutable
pub fn find_run_mut<'a>(
    document: &'a mut Document,
    item_id: &str,
    run_id: &str,
) -> Option<&'a mut InlineRun> {
    find_item_mut(document, item_id)?
        .runs_mut()?
        .iter_mut()
        .find(|r| r.id == run_id)
}

/// The previous item in document order
pub fn upper_neighbor<'a>(document: &'a Document, item_id: &str) -> Option<&'a Item> {
    let index = item_index(document, item_id)?;
    if index == 0 {
        return None;
    }
    document.items.get(index - 1)
}

/// The next item in document order
pub fn lower_neighbor<'a>(document: &'a Document, item_id: &str) -> Option<&'a Item> {
    let index = item_index(document, item_id)?;
    document.items.get(index + 1)
}

/// Document-order comparator: whether item `a` comes strictly before item
/// `b`. Items absent from the document compare as not-before.
pub fn is_before(document: &Document, a: &str, b: &str) -> bool {
    match (item_index(document, a), item_index(document, b)) {
        (Some(ia), Some(ib)) => ia < ib,
        _ => false,
    }
}

/// Exclusive end of the descendant block of the item at `index`: the index
/// of the first following item with `indent <= item.indent`, or the item
/// count if the block runs to the end of the document
pub fn subtree_end(document: &Document, index: usize) -> usize {
    let base = match document.items.get(index) {
        Some(item) => item.indent,
        None => return index,
    };
    let mut end = index + 1;
    while end < document.items.len() && document.items[end].indent > base {
        end += 1;
    }
    end
}

/// Index of the item's parent: the nearest preceding item with a strictly
/// lower indent. Root items have no parent.
pub fn parent_index(document: &Document, index: usize) -> Option<usize> {
    let indent = document.items.get(index)?.indent;
    if indent == 0 {
        return None;
    }
    document.items[..index]
        .iter()
        .rposition(|item| item.indent < indent)
}
