//! Top-level editing intents
//!
//! The UI translates native keyboard/cursor events into these calls. Each
//! method inspects the acting user's selection mode and dispatches to the
//! matching action; the selection is re-derived on every call, so a usecase
//! issued against a since-changed document simply no-ops or lands on the
//! redirected selection.

use crate::actions;
use crate::models::core::ItemKind;
use crate::models::editor_state::EditorState;
use crate::models::selection::SelectionMode;
use crate::transformation;
use crate::traversal;

/// Dispatcher binding one acting user to a replica snapshot
pub struct Usecases<'a> {
    state: &'a mut EditorState,
    user_id: String,
}

impl<'a> Usecases<'a> {
    pub fn new(state: &'a mut EditorState, user_id: impl Into<String>) -> Self {
        Self {
            state,
            user_id: user_id.into(),
        }
    }

    /// Type characters at the acting user's selection
    pub fn input(&mut self, chars: &str) {
        let Some(selection) = self.state.users.get(&self.user_id) else {
            return;
        };
        match selection.mode() {
            SelectionMode::Insert => {
                let collapsed = selection.range.as_ref().is_some_and(|r| r.is_collapsed());
                if collapsed {
                    actions::insert_text(self.state, &self.user_id, chars);
                } else {
                    actions::remove_text(self.state, &self.user_id);
                    actions::insert_text(self.state, &self.user_id, chars);
                }
            }
            SelectionMode::Select => {
                actions::replace_item(self.state, &self.user_id, chars);
            }
            SelectionMode::Normal => {}
        }
    }

    /// Backspace at the acting user's selection
    pub fn remove(&mut self) {
        let Some(selection) = self.state.users.get(&self.user_id) else {
            return;
        };
        match selection.mode() {
            SelectionMode::Insert => {
                let collapsed = selection.range.as_ref().is_some_and(|r| r.is_collapsed());
                if !collapsed {
                    actions::remove_text(self.state, &self.user_id);
                } else if let Some(at_start) = self.caret_at_item_start() {
                    if at_start {
                        self.remove_at_item_start();
                    } else {
                        actions::remove_char(self.state, &self.user_id);
                    }
                }
            }
            SelectionMode::Select => {
                actions::remove_items(self.state, &self.user_id);
            }
            SelectionMode::Normal => {}
        }
    }

    /// Indent every selected subtree one level
    pub fn indent(&mut self) {
        actions::indent(self.state, &self.user_id);
    }

    /// Outdent every selected subtree one level
    pub fn outdent(&mut self) {
        actions::outdent(self.state, &self.user_id);
    }

    /// Split the current item at the caret (or open a fresh paragraph after
    /// an item-level selection)
    pub fn enter(&mut self) {
        actions::split_item(self.state, &self.user_id);
    }

    /// Whether the acting user's caret sits at offset 0 of their item's
    /// first run. `None` when the selection does not resolve.
    fn caret_at_item_start(&self) -> Option<bool> {
        let selection = self.state.users.get(&self.user_id)?;
        let range = selection.range.as_ref()?;
        let item = traversal::find_current_item(&self.state.document, selection)?;
        let run_pos = item.run_position(&range.anchor.id)?;
        Some(run_pos == 0 && range.anchor.offset == 0)
    }

    /// Backspace at the very start of an item escalates structurally:
    /// headings flatten to paragraphs, indented items outdent, root-level
    /// paragraphs merge into their upper neighbor.
    fn remove_at_item_start(&mut self) {
        let Some(selection) = self.state.users.get(&self.user_id) else {
            return;
        };
        let Some(item) = traversal::find_current_item(&self.state.document, selection) else {
            return;
        };
        let item_id = item.id.clone();

        if item.kind == ItemKind::Heading1 {
            // runs survive the kind change, so no selection repair is needed
            transformation::turn_into(&mut self.state.document, &item_id, ItemKind::Paragraph);
        } else if item.indent > 0 {
            actions::outdent(self.state, &self.user_id);
        } else {
            actions::merge_with_previous(self.state, &self.user_id);
        }
    }
}
