//! Selection and range models
//!
//! Every user holds one `Selection` over the shared document. A selection is
//! either item-level (`anchor`/`focus` item ids, `range == None`) or refined
//! to a text-level caret/span inside a single item (`range != None`, which
//! requires `anchor == focus`). The mode is derived, never stored.

use serde::{Deserialize, Serialize};

/// One endpoint of a text-level range: a run id plus a character offset
/// within that run, in `[0, run.char_len()]`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RangePoint {
    pub id: String,
    pub offset: usize,
}

impl RangePoint {
    pub fn new(id: impl Into<String>, offset: usize) -> Self {
        Self { id: id.into(), offset }
    }
}

/// A text-level caret or span inside one item
///
/// `anchor` and `focus` may reference different runs of the same item (a
/// span crossing run boundaries). A collapsed range (`anchor == focus`) is a
/// caret.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Range {
    pub anchor: RangePoint,
    pub focus: RangePoint,
}

impl Range {
    pub fn new(anchor: RangePoint, focus: RangePoint) -> Self {
        Self { anchor, focus }
    }

    /// Collapsed caret at a single point
    pub fn caret(point: RangePoint) -> Self {
        Self { anchor: point.clone(), focus: point }
    }

    /// Whether anchor and focus coincide
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Both endpoints, anchor first
    pub fn points(&self) -> [&RangePoint; 2] {
        [&self.anchor, &self.focus]
    }

    /// Both endpoints for in-place adjustment
    pub fn points_mut(&mut self) -> [&mut RangePoint; 2] {
        [&mut self.anchor, &mut self.focus]
    }
}

/// Derived selection mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionMode {
    /// No selection at all
    Normal,

    /// Item-level selection (one item or a contiguous document-order span)
    Select,

    /// Text-level caret or span inside a single item
    Insert,
}

/// One user's cursor/selection state over the shared document
///
/// Created once when the user joins, then only ever redirected by actions;
/// never deleted while the user is present. The composition fields are
/// UI-owned passthrough state (IME composition) that the engine stores and
/// round-trips but never interprets.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Selection {
    pub is_composing: bool,
    pub composition_text: String,
    pub anchor: Option<String>,
    pub focus: Option<String>,
    pub range: Option<Range>,
}

impl Selection {
    /// A selection pointing at nothing
    pub fn empty() -> Self {
        Self {
            is_composing: false,
            composition_text: String::new(),
            anchor: None,
            focus: None,
            range: None,
        }
    }

    /// An item-level selection collapsed on a single item
    pub fn on_item(item_id: impl Into<String>) -> Self {
        let id = item_id.into();
        Self {
            is_composing: false,
            composition_text: String::new(),
            anchor: Some(id.clone()),
            focus: Some(id),
            range: None,
        }
    }

    /// Derive the selection mode
    pub fn mode(&self) -> SelectionMode {
        if self.range.is_some() {
            SelectionMode::Insert
        } else if self.anchor.is_some() && self.focus.is_some() {
            SelectionMode::Select
        } else {
            SelectionMode::Normal
        }
    }

    /// Collapse to an item-level selection on one item, dropping any range
    pub fn collapse_to_item(&mut self, item_id: impl Into<String>) {
        let id = item_id.into();
        self.anchor = Some(id.clone());
        self.focus = Some(id);
        self.range = None;
    }

    /// Collapse to a text-level caret inside one item
    pub fn collapse_to_caret(&mut self, item_id: impl Into<String>, point: RangePoint) {
        let id = item_id.into();
        self.anchor = Some(id.clone());
        self.focus = Some(id);
        self.range = Some(Range::caret(point));
    }

    /// Point at nothing (document emptied)
    pub fn clear(&mut self) {
        self.anchor = None;
        self.focus = None;
        self.range = None;
    }

    /// Whether either item-level endpoint references the given item
    pub fn references_item(&self, item_id: &str) -> bool {
        self.anchor.as_deref() == Some(item_id) || self.focus.as_deref() == Some(item_id)
    }
}
