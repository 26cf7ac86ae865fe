//! Text-level actions: insertion and deletion inside one item's runs

use std::collections::BTreeSet;

use crate::actions::postprocess::normalize_runs;
use crate::models::editor_state::EditorState;
use crate::models::selection::RangePoint;
use crate::transformation;
use crate::traversal;
use crate::utils::text::char_len;

/// Insert characters at the acting user's collapsed caret.
///
/// Offset adjustment is asymmetric by design: the actor's endpoints at the
/// insertion point shift with the inserted text (`offset >= P`), while every
/// other user's endpoints shift only when strictly past it (`offset > P`).
/// The typist's caret moves past what they typed; a collaborator whose caret
/// sits exactly at the insertion point is not dragged along by a keystroke
/// they did not make.
pub fn insert_text(state: &mut EditorState, user_id: &str, chars: &str) {
    if chars.is_empty() {
        return;
    }
    let Some((item_id, run_id, offset)) = collapsed_caret(state, user_id) else {
        return;
    };
    let Some(run) = traversal::find_run_mut(&mut state.document, &item_id, &run_id) else {
        return;
    };

    transformation::insert_text(run, offset, chars);
    let inserted = char_len(chars);

    for (uid, selection) in state.users.iter_mut() {
        let acting = uid == user_id;
        let Some(range) = selection.range.as_mut() else {
            continue;
        };
        for point in range.points_mut() {
            if point.id != run_id {
                continue;
            }
            let shifts = if acting { point.offset >= offset } else { point.offset > offset };
            if shifts {
                point.offset += inserted;
            }
        }
    }

    log::debug!("insert_text: {} chars into run {} at {}", inserted, run_id, offset);
}

/// Backspace at a collapsed caret: delete the character before the caret,
/// reaching into the previous run when the caret sits at a run boundary.
/// Deleting at the very start of an item is the usecase layer's decision
/// (outdent / merge / kind change), not this action's.
pub fn remove_char(state: &mut EditorState, user_id: &str) {
    let Some((item_id, run_id, offset)) = collapsed_caret(state, user_id) else {
        return;
    };

    if offset > 0 {
        delete_in_run(state, &item_id, &run_id, offset - 1, offset);
    } else {
        let Some(item) = traversal::find_item(&state.document, &item_id) else {
            return;
        };
        let Some(run_pos) = item.run_position(&run_id) else {
            return;
        };
        if run_pos == 0 {
            return;
        }
        let previous = &item.runs()[run_pos - 1];
        let previous_id = previous.id.clone();
        let len = previous.char_len();
        if len == 0 {
            return;
        }
        delete_in_run(state, &item_id, &previous_id, len - 1, len);
    }

    normalize_runs(state, &item_id);
}

/// Delete the acting user's expanded text range (single- or cross-run
/// within one item), collapsing their selection to the start of the cut.
pub fn remove_text(state: &mut EditorState, user_id: &str) {
    let Some(selection) = state.users.get(user_id) else {
        return;
    };
    let Some(range) = selection.range.clone() else {
        return;
    };
    if range.is_collapsed() {
        return;
    }
    let Some(item_id) = selection.anchor.clone() else {
        return;
    };
    let Some(item) = traversal::find_item(&state.document, &item_id) else {
        return;
    };
    let Some(anchor_pos) = item.run_position(&range.anchor.id) else {
        return;
    };
    let Some(focus_pos) = item.run_position(&range.focus.id) else {
        return;
    };

    // order the endpoints by (run position, offset) in document order
    let (start, start_pos, end, end_pos) =
        if (anchor_pos, range.anchor.offset) <= (focus_pos, range.focus.offset) {
            (range.anchor.clone(), anchor_pos, range.focus.clone(), focus_pos)
        } else {
            (range.focus.clone(), focus_pos, range.anchor.clone(), anchor_pos)
        };

    if start_pos == end_pos {
        delete_in_run(state, &item_id, &start.id, start.offset, end.offset);
    } else {
        delete_across_runs(state, user_id, &item_id, start_pos, start.offset, end_pos, end.offset);
    }

    normalize_runs(state, &item_id);
}

/// The acting user's collapsed caret, if that is what their selection is
fn collapsed_caret(state: &EditorState, user_id: &str) -> Option<(String, String, usize)> {
    let selection = state.users.get(user_id)?;
    let range = selection.range.as_ref()?;
    if !range.is_collapsed() {
        return None;
    }
    let item_id = selection.anchor.clone()?;
    Some((item_id, range.anchor.id.clone(), range.anchor.offset))
}

/// Splice `[start, end)` out of one run and adjust every user's endpoints
/// on that run: before the cut unchanged, within it clamped to `start`,
/// past it shifted left by the cut length.
pub(crate) fn delete_in_run(
    state: &mut EditorState,
    item_id: &str,
    run_id: &str,
    start: usize,
    end: usize,
) {
    if start >= end {
        return;
    }
    let Some(run) = traversal::find_run_mut(&mut state.document, item_id, run_id) else {
        return;
    };
    transformation::remove_text(run, start, end - start);
    let removed = end - start;

    for selection in state.users.values_mut() {
        let Some(range) = selection.range.as_mut() else {
            continue;
        };
        for point in range.points_mut() {
            if point.id != run_id {
                continue;
            }
            if point.offset >= end {
                point.offset -= removed;
            } else if point.offset >= start {
                point.offset = start;
            }
        }
    }

    log::debug!("delete_in_run: [{start}, {end}) from run {run_id}");
}

/// Expanded deletion spanning two or more runs of the same item: the start
/// run keeps `[0, start_offset)`, the end run keeps `[end_offset ..)`, and
/// every run strictly between is dropped. The actor collapses to the start
/// of the cut; every other endpoint inside the deleted span re-points there.
fn delete_across_runs(
    state: &mut EditorState,
    user_id: &str,
    item_id: &str,
    start_pos: usize,
    start_offset: usize,
    end_pos: usize,
    end_offset: usize,
) {
    let Some(item) = traversal::find_item_mut(&mut state.document, item_id) else {
        return;
    };
    let Some(runs) = item.runs_mut() else {
        return;
    };

    let start_id = runs[start_pos].id.clone();
    let end_id = runs[end_pos].id.clone();
    let removed_run_ids: BTreeSet<String> =
        runs[start_pos + 1..end_pos].iter().map(|r| r.id.clone()).collect();

    let start_len = runs[start_pos].char_len();
    transformation::remove_text(
        &mut runs[start_pos],
        start_offset,
        start_len.saturating_sub(start_offset),
    );
    transformation::remove_text(&mut runs[end_pos], 0, end_offset);
    runs.drain(start_pos + 1..end_pos);

    for (uid, selection) in state.users.iter_mut() {
        if uid == user_id {
            selection.collapse_to_caret(item_id, RangePoint::new(start_id.clone(), start_offset));
            continue;
        }
        let Some(range) = selection.range.as_mut() else {
            continue;
        };
        for point in range.points_mut() {
            if removed_run_ids.contains(&point.id) {
                *point = RangePoint::new(start_id.clone(), start_offset);
            } else if point.id == start_id && point.offset > start_offset {
                point.offset = start_offset;
            } else if point.id == end_id {
                if point.offset >= end_offset {
                    point.offset -= end_offset;
                } else {
                    *point = RangePoint::new(start_id.clone(), start_offset);
                }
            }
        }
    }

    log::debug!(
        "delete_across_runs: runs {}..={} of item {} ({} runs dropped)",
        start_pos,
        end_pos,
        item_id,
        removed_run_ids.len()
    );
}
