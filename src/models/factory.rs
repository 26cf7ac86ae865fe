//! Constructors and id generation
//!
//! Every entity id is a fresh uuid-v4 string so that ids stay unique across
//! replicas without coordination.

use std::collections::BTreeSet;
use uuid::Uuid;

use crate::models::core::{Decoration, Document, InlineRun, Item, ItemKind};
use crate::models::selection::{Range, RangePoint};

/// Fresh unique id
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// An inline run with the given text and marks
pub fn run(text: impl Into<String>, marks: BTreeSet<Decoration>) -> InlineRun {
    InlineRun {
        id: new_id(),
        text: text.into(),
        marks,
    }
}

/// An unmarked inline run
pub fn plain_run(text: impl Into<String>) -> InlineRun {
    run(text, BTreeSet::new())
}

/// A root-level paragraph with a single unmarked run
pub fn paragraph(text: impl Into<String>) -> Item {
    paragraph_with_runs(vec![plain_run(text)])
}

/// A root-level paragraph over explicit runs
pub fn paragraph_with_runs(runs: Vec<InlineRun>) -> Item {
    Item {
        id: new_id(),
        kind: ItemKind::Paragraph,
        indent: 0,
        inline: Some(runs),
    }
}

/// A root-level heading with a single unmarked run
pub fn heading1(text: impl Into<String>) -> Item {
    Item {
        id: new_id(),
        kind: ItemKind::Heading1,
        indent: 0,
        inline: Some(vec![plain_run(text)]),
    }
}

/// A root-level horizontal rule (no inline content)
pub fn horizontal_rule() -> Item {
    Item {
        id: new_id(),
        kind: ItemKind::HorizontalRule,
        indent: 0,
        inline: None,
    }
}

/// A paragraph holding one empty run
pub fn empty_paragraph() -> Item {
    paragraph("")
}

/// A document with no items
pub fn empty_document(title: impl Into<String>) -> Document {
    Document {
        id: new_id(),
        title: title.into(),
        items: Vec::new(),
    }
}

/// A document over explicit items
pub fn document_with_items(title: impl Into<String>, items: Vec<Item>) -> Document {
    Document {
        id: new_id(),
        title: title.into(),
        items,
    }
}

/// A collapsed caret range at a run offset
pub fn caret(run_id: impl Into<String>, offset: usize) -> Range {
    Range::caret(RangePoint::new(run_id, offset))
}
