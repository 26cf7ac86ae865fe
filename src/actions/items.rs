//! Item-level actions: removal, replacement, splitting, merging, and
//! structural indent/outdent
//!
//! Removal redirects follow one deterministic rule set: the replacement
//! target is the removed span's next surviving item, else the previous one,
//! else nothing (document emptied). When only one endpoint of another
//! user's span is removed, the document-order comparator decides which side
//! it snaps to.

use std::collections::{BTreeMap, BTreeSet};

use crate::actions::postprocess::normalize_runs;
use crate::actions::text::insert_text;
use crate::models::core::{InlineRun, Item, ItemKind};
use crate::models::editor_state::EditorState;
use crate::models::factory;
use crate::models::selection::{Range, RangePoint, Selection, SelectionMode};
use crate::transformation;
use crate::traversal;
use crate::utils::text::byte_index;

/// Remove every item in the acting user's item-level selection.
///
/// The actor collapses onto the next surviving item, else the previous one,
/// else to nothing. Every other user whose selection touched the removed
/// span is redirected by [`remove_span`]'s rules.
pub fn remove_items(state: &mut EditorState, user_id: &str) {
    let Some(selection) = state.users.get(user_id) else {
        return;
    };
    if selection.mode() != SelectionMode::Select {
        return;
    }
    let Some((lo, hi)) = traversal::current_item_indices(&state.document, selection) else {
        return;
    };

    let span = remove_span(state, lo, hi, user_id);

    let Some(selection) = state.users.get_mut(user_id) else {
        return;
    };
    match span.target() {
        Some(id) => selection.collapse_to_item(id),
        None => selection.clear(),
    }

    log::debug!("remove_items: {} item(s) removed by {}", hi - lo + 1, user_id);
}

/// `input` over an item-level selection: all but the first selected item are
/// removed, the first is coerced to a paragraph holding one empty run, the
/// actor's caret lands at its start, and the supplied characters are typed
/// there.
pub fn replace_item(state: &mut EditorState, user_id: &str, chars: &str) {
    let Some(selection) = state.users.get(user_id) else {
        return;
    };
    if selection.mode() != SelectionMode::Select {
        return;
    }
    let Some((lo, hi)) = traversal::current_item_indices(&state.document, selection) else {
        return;
    };

    if hi > lo {
        remove_span(state, lo + 1, hi, user_id);
    }

    let first_id = state.document.items[lo].id.clone();
    transformation::turn_into(&mut state.document, &first_id, ItemKind::Paragraph);

    // swap the inline content for a single empty run, re-pointing every
    // endpoint that referenced the old runs to the fresh one
    let replacement = factory::plain_run("");
    let replacement_id = replacement.id.clone();
    let old_run_ids: BTreeSet<String> = {
        let item = &mut state.document.items[lo];
        let old = item.runs().iter().map(|r| r.id.clone()).collect();
        item.inline = Some(vec![replacement]);
        old
    };
    for selection in state.users.values_mut() {
        let Some(range) = selection.range.as_mut() else {
            continue;
        };
        for point in range.points_mut() {
            if old_run_ids.contains(&point.id) {
                *point = RangePoint::new(replacement_id.clone(), 0);
            }
        }
    }

    if let Some(selection) = state.users.get_mut(user_id) {
        selection.collapse_to_caret(first_id.clone(), RangePoint::new(replacement_id, 0));
    }

    insert_text(state, user_id, chars);
    log::debug!("replace_item: item {} rewritten by {}", first_id, user_id);
}

/// `enter`: split the current item at the actor's collapsed caret.
///
/// The caret run keeps the text before the caret; a new run takes the rest
/// and moves, with all following runs, into a new paragraph of the same
/// indent inserted directly after. In item-level mode an empty paragraph is
/// appended after the selection instead. Endpoint handling at the split
/// point mirrors the insertion asymmetry: other users' endpoints exactly at
/// the caret stay, endpoints past it follow the moved text.
pub fn split_item(state: &mut EditorState, user_id: &str) {
    let Some(selection) = state.users.get(user_id) else {
        return;
    };
    match selection.mode() {
        SelectionMode::Insert => split_at_caret(state, user_id),
        SelectionMode::Select => append_paragraph_after(state, user_id),
        SelectionMode::Normal => {}
    }
}

fn split_at_caret(state: &mut EditorState, user_id: &str) {
    let Some(selection) = state.users.get(user_id) else {
        return;
    };
    let Some(range) = selection.range.clone() else {
        return;
    };
    if !range.is_collapsed() {
        return;
    }
    let Some(item_id) = selection.anchor.clone() else {
        return;
    };
    let Some(item_pos) = traversal::item_index(&state.document, &item_id) else {
        return;
    };

    let item = &mut state.document.items[item_pos];
    let indent = item.indent;
    let Some(run_pos) = item.run_position(&range.anchor.id) else {
        return;
    };
    let Some(runs) = item.runs_mut() else {
        return;
    };

    let split_run_id = runs[run_pos].id.clone();
    let offset = range.anchor.offset.min(runs[run_pos].char_len());

    // text after the caret leaves the split run...
    let cut = byte_index(&runs[run_pos].text, offset);
    let tail_text = runs[run_pos].text.split_off(cut);

    // ...and every following run moves wholesale
    let mut moved: Vec<InlineRun> = runs.drain(run_pos + 1..).collect();
    let mut tail_run_id = None;
    if !tail_text.is_empty() || moved.is_empty() {
        let tail_run = factory::run(tail_text, runs[run_pos].marks.clone());
        tail_run_id = Some(tail_run.id.clone());
        moved.insert(0, tail_run);
    }
    let moved_ids: BTreeSet<String> = moved.iter().map(|r| r.id.clone()).collect();

    let new_item = Item {
        id: factory::new_id(),
        kind: ItemKind::Paragraph,
        indent,
        inline: Some(moved),
    };
    let new_item_id = new_item.id.clone();
    let first_moved_run = new_item.first_run().map(|r| r.id.clone()).unwrap_or_default();
    state.document.items.insert(item_pos + 1, new_item);

    for (uid, user_selection) in state.users.iter_mut() {
        if uid == user_id {
            user_selection
                .collapse_to_caret(new_item_id.clone(), RangePoint::new(first_moved_run.clone(), 0));
            continue;
        }
        let Some(user_range) = user_selection.range.as_mut() else {
            continue;
        };
        for point in user_range.points_mut() {
            if point.id == split_run_id && point.offset > offset {
                if let Some(tail_id) = &tail_run_id {
                    point.id = tail_id.clone();
                    point.offset -= offset;
                }
            }
        }
        // a range now hosted (fully or partly) by the new item re-anchors
        let anchor_moved = moved_ids.contains(&user_range.anchor.id);
        let focus_moved = moved_ids.contains(&user_range.focus.id);
        match (anchor_moved, focus_moved) {
            (true, true) => {
                user_selection.anchor = Some(new_item_id.clone());
                user_selection.focus = Some(new_item_id.clone());
            }
            (true, false) | (false, true) => {
                // the span straddles the split; collapse to its anchor side
                let kept = user_range.anchor.clone();
                let host = if anchor_moved { new_item_id.clone() } else { item_id.clone() };
                *user_range = Range::caret(kept);
                user_selection.anchor = Some(host.clone());
                user_selection.focus = Some(host);
            }
            (false, false) => {}
        }
    }

    // splitting at offset 0 of a mid-list run leaves it empty; elide it
    normalize_runs(state, &item_id);
    log::debug!("split_item: {} split into {} by {}", item_id, new_item_id, user_id);
}

fn append_paragraph_after(state: &mut EditorState, user_id: &str) {
    let Some(selection) = state.users.get(user_id) else {
        return;
    };
    let Some((_, hi)) = traversal::current_item_indices(&state.document, selection) else {
        return;
    };

    let sibling_id = state.document.items[hi].id.clone();
    let paragraph = factory::empty_paragraph();
    let paragraph_id = paragraph.id.clone();
    let run_id = paragraph.first_run().map(|r| r.id.clone()).unwrap_or_default();
    transformation::insert_after(&mut state.document, &sibling_id, paragraph);

    if let Some(selection) = state.users.get_mut(user_id) {
        selection.collapse_to_caret(paragraph_id, RangePoint::new(run_id, 0));
    }
}

/// Backspace at the very start of a root-level paragraph: its runs are
/// appended to the upper neighbor and the item disappears. A horizontal-rule
/// neighbor is removed instead of merged into.
pub fn merge_with_previous(state: &mut EditorState, user_id: &str) {
    let Some(selection) = state.users.get(user_id) else {
        return;
    };
    let Some(range) = selection.range.as_ref() else {
        return;
    };
    if !range.is_collapsed() {
        return;
    }
    let Some(item_id) = selection.anchor.clone() else {
        return;
    };
    let Some(item_pos) = traversal::item_index(&state.document, &item_id) else {
        return;
    };
    if item_pos == 0 {
        return;
    }

    let Some(previous) = traversal::upper_neighbor(&state.document, &item_id) else {
        return;
    };
    if previous.kind == ItemKind::HorizontalRule {
        remove_span(state, item_pos - 1, item_pos - 1, user_id);
        return;
    }

    let previous_id = previous.id.clone();
    let junction = previous
        .last_run()
        .map(|r| RangePoint::new(r.id.clone(), r.char_len()));
    let Some(junction) = junction else {
        return;
    };

    let removed = state.document.items.remove(item_pos);
    let moved_runs = removed.inline.unwrap_or_default();
    if let Some(runs) = state.document.items[item_pos - 1].runs_mut() {
        runs.extend(moved_runs);
    }

    for (uid, user_selection) in state.users.iter_mut() {
        if uid == user_id {
            user_selection.collapse_to_caret(previous_id.clone(), junction.clone());
            continue;
        }
        // moved runs keep their ids, only their hosting item changes
        if user_selection.anchor.as_deref() == Some(removed.id.as_str()) {
            user_selection.anchor = Some(previous_id.clone());
        }
        if user_selection.focus.as_deref() == Some(removed.id.as_str()) {
            user_selection.focus = Some(previous_id.clone());
        }
    }

    normalize_runs(state, &previous_id);
    log::debug!("merge_with_previous: {} merged into {}", removed.id, previous_id);
}

/// Indent every selected subtree one level. Items whose ancestor is also
/// selected are skipped so each subtree moves exactly once. Selections are
/// untouched: ids are preserved, only indent numbers change.
pub fn indent(state: &mut EditorState, user_id: &str) {
    for_each_selected_subtree(state, user_id, transformation::indent_item);
}

/// Inverse of [`indent`], a no-op for items already at the document root.
pub fn outdent(state: &mut EditorState, user_id: &str) {
    for_each_selected_subtree(state, user_id, transformation::outdent_item);
}

fn for_each_selected_subtree(
    state: &mut EditorState,
    user_id: &str,
    apply: fn(&mut crate::models::core::Document, &str),
) {
    let Some(selection) = state.users.get(user_id) else {
        return;
    };
    let Some((lo, hi)) = traversal::current_item_indices(&state.document, selection) else {
        return;
    };

    let mut index = lo;
    while index <= hi {
        let end = traversal::subtree_end(&state.document, index);
        let id = state.document.items[index].id.clone();
        apply(&mut state.document, &id);
        index = end.max(index + 1);
    }
}

/// Outcome of a span removal: the ids bracketing the removed slice
pub(crate) struct SpanRemoval {
    next: Option<String>,
    prev: Option<String>,
}

impl SpanRemoval {
    /// The deterministic redirect target: next surviving item, else the
    /// previous one, else nothing
    pub(crate) fn target(&self) -> Option<String> {
        self.next.clone().or_else(|| self.prev.clone())
    }
}

/// Remove `items[lo..=hi]` and redirect every user's selection except the
/// acting user's (the caller decides where the actor lands).
///
/// Redirect rules for another user's endpoints referencing removed items:
/// - both endpoints inside the span: collapse to next-else-previous-else-none
/// - one endpoint inside: it snaps to the next surviving item when it was
///   the upper endpoint (pre-removal document order), else to the previous
pub(crate) fn remove_span(
    state: &mut EditorState,
    lo: usize,
    hi: usize,
    user_id: &str,
) -> SpanRemoval {
    // pre-removal order backs the tie-break comparator
    let order: BTreeMap<String, usize> = state
        .document
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| (item.id.clone(), index))
        .collect();
    let removed: BTreeSet<String> =
        state.document.items[lo..=hi].iter().map(|item| item.id.clone()).collect();
    let next = state.document.items.get(hi + 1).map(|item| item.id.clone());
    let prev = if lo > 0 {
        Some(state.document.items[lo - 1].id.clone())
    } else {
        None
    };

    state.document.items.drain(lo..=hi);

    let span = SpanRemoval { next, prev };
    for (uid, selection) in state.users.iter_mut() {
        if uid == user_id {
            continue;
        }
        redirect_after_removal(selection, &removed, &order, &span);
    }
    span
}

fn redirect_after_removal(
    selection: &mut Selection,
    removed: &BTreeSet<String>,
    order: &BTreeMap<String, usize>,
    span: &SpanRemoval,
) {
    let anchor_removed = selection.anchor.as_deref().is_some_and(|id| removed.contains(id));
    let focus_removed = selection.focus.as_deref().is_some_and(|id| removed.contains(id));
    if !anchor_removed && !focus_removed {
        return;
    }

    if anchor_removed && focus_removed {
        match span.target() {
            Some(id) => selection.collapse_to_item(id),
            None => selection.clear(),
        }
        return;
    }

    // exactly one endpoint vanished; the document-order comparator decides
    // which surviving side it snaps to
    let (gone, kept) = if anchor_removed {
        (selection.anchor.clone(), selection.focus.clone())
    } else {
        (selection.focus.clone(), selection.anchor.clone())
    };
    let gone_is_upper = match (gone.and_then(|id| order.get(&id).copied()), kept.and_then(|id| order.get(&id).copied())) {
        (Some(a), Some(b)) => a < b,
        _ => true,
    };
    let target = if gone_is_upper {
        span.next.clone().or_else(|| span.prev.clone())
    } else {
        span.prev.clone().or_else(|| span.next.clone())
    };

    match (anchor_removed, target) {
        (true, Some(id)) => selection.anchor = Some(id),
        (false, Some(id)) => selection.focus = Some(id),
        (_, None) => selection.clear(),
    }
}
