//! Run normalization after deletions
//!
//! Deletions can leave an item's run list denormalized: adjacent runs with
//! identical mark sets, or runs with no text left. This pass restores the
//! run invariants and re-anchors every selection endpoint that referenced a
//! run it removed.

use crate::models::editor_state::EditorState;
use crate::models::selection::RangePoint;
use crate::traversal;

/// How an endpoint on a removed run is re-anchored
enum RunRedirect {
    /// The run was concatenated onto its left neighbor; offsets move past
    /// the neighbor's prior text
    Merged { from: String, into: String, prefix: usize },

    /// The run was empty and dropped; endpoints land on a fixed point
    Dropped { from: String, to: RangePoint },
}

/// Normalize an item's runs: (1) merge each adjacent pair with identical
/// mark sets, (2) drop runs left with empty text unless sole run. Every
/// selection endpoint on a removed run is re-pointed; redirects chain in
/// application order, so an endpoint merged onto a run that is later
/// dropped follows both hops.
pub fn normalize_runs(state: &mut EditorState, item_id: &str) {
    let mut redirects: Vec<RunRedirect> = Vec::new();

    {
        let Some(item) = traversal::find_item_mut(&mut state.document, item_id) else {
            return;
        };
        let Some(runs) = item.runs_mut() else {
            return;
        };

        // merge identical-mark neighbors; stay on the same index after a
        // merge, the new right neighbor may match as well
        let mut i = 0;
        while i + 1 < runs.len() {
            if runs[i].marks == runs[i + 1].marks {
                let prefix = runs[i].char_len();
                let absorbed = runs.remove(i + 1);
                runs[i].text.push_str(&absorbed.text);
                redirects.push(RunRedirect::Merged {
                    from: absorbed.id,
                    into: runs[i].id.clone(),
                    prefix,
                });
            } else {
                i += 1;
            }
        }

        // drop empty runs while at least one other run remains
        let mut j = 0;
        while runs.len() > 1 && j < runs.len() {
            if runs[j].text.is_empty() {
                let to = if j > 0 {
                    RangePoint::new(runs[j - 1].id.clone(), runs[j - 1].char_len())
                } else {
                    RangePoint::new(runs[1].id.clone(), 0)
                };
                let dropped = runs.remove(j);
                redirects.push(RunRedirect::Dropped { from: dropped.id, to });
            } else {
                j += 1;
            }
        }
    }

    if redirects.is_empty() {
        return;
    }

    for selection in state.users.values_mut() {
        let Some(range) = selection.range.as_mut() else {
            continue;
        };
        for point in range.points_mut() {
            for redirect in &redirects {
                match redirect {
                    RunRedirect::Merged { from, into, prefix } => {
                        if point.id == *from {
                            point.id = into.clone();
                            point.offset += prefix;
                        }
                    }
                    RunRedirect::Dropped { from, to } => {
                        if point.id == *from {
                            *point = to.clone();
                        }
                    }
                }
            }
        }
    }

    log::debug!("normalize_runs: {} redirect(s) on item {}", redirects.len(), item_id);
}
