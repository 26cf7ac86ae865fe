//! Core data structures for the collaborative outline editor
//!
//! This module defines the flat-item document model: a document is an
//! ordered sequence of block items, and hierarchy is encoded by a per-item
//! indent level rather than parent/child pointers. The item order in
//! `Document::items` is the document's total order and the single source of
//! truth for every before/after comparison.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::utils::text::char_len;

/// Block-level item kind
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    /// Plain text paragraph
    Paragraph,

    /// Top-level heading
    Heading1,

    /// Divider with no inline content
    HorizontalRule,
}

impl ItemKind {
    /// Whether items of this kind carry inline runs
    pub fn has_inline(&self) -> bool {
        !matches!(self, ItemKind::HorizontalRule)
    }

    /// Whether items of this kind may own nested items
    pub fn owns_children(&self) -> bool {
        matches!(self, ItemKind::Paragraph)
    }
}

/// Character-level formatting mark on an inline run
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Decoration {
    Bold,
    Italic,
    Code,
    Strike,
}

/// One contiguous inline text span with a uniform mark set
///
/// Invariants (restored by run normalization after every deletion):
/// - within one item, no two adjacent runs have identical mark sets
/// - no run has empty text unless it is the sole run of its item
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct InlineRun {
    pub id: String,
    pub text: String,
    pub marks: BTreeSet<Decoration>,
}

impl InlineRun {
    /// Length of the run text in characters (selection offsets are
    /// character offsets, not bytes)
    pub fn char_len(&self) -> usize {
        char_len(&self.text)
    }
}

/// One block-level unit in the flat document sequence
///
/// `inline` is `None` iff `kind == HorizontalRule`. An item Y is a
/// descendant of an item X iff Y appears after X and every item strictly
/// between X and Y (inclusive of Y) has `indent > X.indent`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Item {
    pub id: String,
    pub kind: ItemKind,
    pub indent: u32,
    pub inline: Option<Vec<InlineRun>>,
}

impl Item {
    /// The item's runs, or an empty slice for horizontal rules
    pub fn runs(&self) -> &[InlineRun] {
        self.inline.as_deref().unwrap_or(&[])
    }

    /// Mutable access to the item's runs
    pub fn runs_mut(&mut self) -> Option<&mut Vec<InlineRun>> {
        self.inline.as_mut()
    }

    /// Position of a run within this item
    pub fn run_position(&self, run_id: &str) -> Option<usize> {
        self.runs().iter().position(|r| r.id == run_id)
    }

    /// First run of the item
    pub fn first_run(&self) -> Option<&InlineRun> {
        self.runs().first()
    }

    /// Last run of the item
    pub fn last_run(&self) -> Option<&InlineRun> {
        self.runs().last()
    }

    /// Concatenated text of all runs
    pub fn plain_text(&self) -> String {
        self.runs().iter().map(|r| r.text.as_str()).collect()
    }
}

/// The shared document: a flat, ordered sequence of items
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub items: Vec<Item>,
}

impl Document {
    /// Whether the document has no items at all
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::factory;

    #[test]
    fn test_kind_inline_ownership() {
        assert!(ItemKind::Paragraph.has_inline());
        assert!(ItemKind::Heading1.has_inline());
        assert!(!ItemKind::HorizontalRule.has_inline());
        assert!(ItemKind::Paragraph.owns_children());
        assert!(!ItemKind::Heading1.owns_children());
    }

    #[test]
    fn test_kind_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ItemKind::HorizontalRule).unwrap(),
            "\"horizontal-rule\""
        );
        assert_eq!(serde_json::to_string(&ItemKind::Heading1).unwrap(), "\"heading1\"");
    }

    #[test]
    fn test_item_plain_text_spans_runs() {
        let item = factory::paragraph_with_runs(vec![
            factory::run("Hello ", BTreeSet::new()),
            factory::run("world", BTreeSet::from([Decoration::Bold])),
        ]);
        assert_eq!(item.plain_text(), "Hello world");
        assert_eq!(item.runs().len(), 2);
    }
}
