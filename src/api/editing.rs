//! Editing operations exposed to JavaScript
//!
//! Each function takes the replica snapshot (document + all users'
//! selections) as a JS value, runs one usecase for the acting user, and
//! returns the updated snapshot. Mutation is in place on the deserialized
//! copy; the caller re-renders from (and replicates) the returned object.

use wasm_bindgen::prelude::*;

use crate::api::helpers;
use crate::models::editor_state::EditorState;
use crate::models::factory;
use crate::models::selection::Selection;
use crate::usecases::Usecases;

/// Create a fresh document snapshot holding one empty paragraph
#[wasm_bindgen(js_name = createDocument)]
pub fn create_document(title: String) -> Result<JsValue, JsValue> {
    let document = factory::document_with_items(title, vec![factory::empty_paragraph()]);
    let state = EditorState::new(document);
    helpers::serialize(&state, "createDocument snapshot")
}

/// Register a user, pointing their selection at the first item
#[wasm_bindgen(js_name = addUser)]
pub fn add_user(state: JsValue, user_id: String) -> Result<JsValue, JsValue> {
    let mut state: EditorState = helpers::deserialize(state, "addUser snapshot")?;
    state.add_user(user_id);
    helpers::serialize(&state, "addUser snapshot")
}

/// Replace a user's selection wholesale (window-selection translation is
/// the UI's job; the engine only stores what it is handed)
#[wasm_bindgen(js_name = setSelection)]
pub fn set_selection(
    state: JsValue,
    user_id: String,
    selection: JsValue,
) -> Result<JsValue, JsValue> {
    let mut state: EditorState = helpers::deserialize(state, "setSelection snapshot")?;
    let selection: Selection = helpers::deserialize(selection, "setSelection selection")?;
    state.users.insert(user_id, selection);
    helpers::serialize(&state, "setSelection snapshot")
}

/// Type characters at the acting user's selection
#[wasm_bindgen(js_name = input)]
pub fn input(state: JsValue, user_id: String, chars: String) -> Result<JsValue, JsValue> {
    log::info!("input: {} char(s) from {}", chars.chars().count(), user_id);
    with_usecases(state, &user_id, "input snapshot", |usecases| usecases.input(&chars))
}

/// Backspace at the acting user's selection
#[wasm_bindgen(js_name = remove)]
pub fn remove(state: JsValue, user_id: String) -> Result<JsValue, JsValue> {
    log::info!("remove: from {}", user_id);
    with_usecases(state, &user_id, "remove snapshot", |usecases| usecases.remove())
}

/// Indent the selected subtrees
#[wasm_bindgen(js_name = indent)]
pub fn indent(state: JsValue, user_id: String) -> Result<JsValue, JsValue> {
    with_usecases(state, &user_id, "indent snapshot", |usecases| usecases.indent())
}

/// Outdent the selected subtrees
#[wasm_bindgen(js_name = outdent)]
pub fn outdent(state: JsValue, user_id: String) -> Result<JsValue, JsValue> {
    with_usecases(state, &user_id, "outdent snapshot", |usecases| usecases.outdent())
}

/// Split the current item at the caret
#[wasm_bindgen(js_name = enter)]
pub fn enter(state: JsValue, user_id: String) -> Result<JsValue, JsValue> {
    with_usecases(state, &user_id, "enter snapshot", |usecases| usecases.enter())
}

fn with_usecases(
    state: JsValue,
    user_id: &str,
    context: &str,
    run: impl FnOnce(&mut Usecases),
) -> Result<JsValue, JsValue> {
    let mut state: EditorState = helpers::deserialize(state, context)?;
    let mut usecases = Usecases::new(&mut state, user_id);
    run(&mut usecases);
    helpers::serialize(&state, context)
}
