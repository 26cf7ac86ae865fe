// Item-removal redirect determinism: removed selections land on the next
// surviving item, else the previous one, else nothing; a half-removed span
// snaps the vanished endpoint by document order.

use outline_editor_wasm::models::factory;
use outline_editor_wasm::{EditorState, RangePoint, SelectionMode, Usecases};

fn three_paragraphs() -> (EditorState, Vec<String>) {
    let doc = factory::document_with_items(
        "doc",
        vec![
            factory::paragraph("a"),
            factory::paragraph("b"),
            factory::paragraph("c"),
        ],
    );
    let ids: Vec<String> = doc.items.iter().map(|i| i.id.clone()).collect();
    let mut state = EditorState::new(doc);
    state.add_user("alice");
    state.add_user("bob");
    (state, ids)
}

fn select(state: &mut EditorState, user: &str, anchor: &str, focus: &str) {
    let selection = state.users.get_mut(user).unwrap();
    selection.anchor = Some(anchor.to_string());
    selection.focus = Some(focus.to_string());
    selection.range = None;
}

#[test]
fn test_removing_the_only_item_clears_every_affected_selection() {
    let doc = factory::document_with_items("doc", vec![factory::paragraph("only")]);
    let only = doc.items[0].id.clone();
    let run = doc.items[0].runs()[0].id.clone();
    let mut state = EditorState::new(doc);
    state.add_user("alice");
    state.add_user("bob");
    select(&mut state, "alice", &only, &only);
    state
        .users
        .get_mut("bob")
        .unwrap()
        .collapse_to_caret(only.clone(), RangePoint::new(run, 1));

    Usecases::new(&mut state, "alice").remove();

    assert!(state.document.is_empty());
    for user in ["alice", "bob"] {
        let selection = &state.users[user];
        assert_eq!(selection.mode(), SelectionMode::Normal, "{user} must point at nothing");
        assert!(selection.range.is_none());
    }
}

#[test]
fn test_redirect_prefers_next_surviving_item() {
    let (mut state, ids) = three_paragraphs();
    select(&mut state, "alice", &ids[1], &ids[1]);
    select(&mut state, "bob", &ids[1], &ids[1]);

    Usecases::new(&mut state, "alice").remove();

    assert_eq!(state.document.items.len(), 2);
    for user in ["alice", "bob"] {
        assert_eq!(state.users[user].anchor.as_deref(), Some(ids[2].as_str()));
        assert_eq!(state.users[user].focus.as_deref(), Some(ids[2].as_str()));
    }
}

#[test]
fn test_redirect_falls_back_to_previous_item() {
    let (mut state, ids) = three_paragraphs();
    select(&mut state, "alice", &ids[2], &ids[2]);

    Usecases::new(&mut state, "alice").remove();

    assert_eq!(state.users["alice"].anchor.as_deref(), Some(ids[1].as_str()));
}

#[test]
fn test_unrelated_selections_are_untouched() {
    let (mut state, ids) = three_paragraphs();
    select(&mut state, "alice", &ids[1], &ids[1]);
    select(&mut state, "bob", &ids[0], &ids[0]);

    Usecases::new(&mut state, "alice").remove();

    assert_eq!(state.users["bob"].anchor.as_deref(), Some(ids[0].as_str()));
}

#[test]
fn test_half_removed_span_snaps_upper_endpoint_to_next() {
    let doc = factory::document_with_items(
        "doc",
        vec![
            factory::paragraph("a"),
            factory::paragraph("b"),
            factory::paragraph("c"),
            factory::paragraph("d"),
        ],
    );
    let ids: Vec<String> = doc.items.iter().map(|i| i.id.clone()).collect();
    let mut state = EditorState::new(doc);
    state.add_user("alice");
    state.add_user("bob");

    // alice removes b..c; bob's span is c..d, so its upper endpoint vanishes
    select(&mut state, "alice", &ids[1], &ids[2]);
    select(&mut state, "bob", &ids[2], &ids[3]);

    Usecases::new(&mut state, "alice").remove();

    assert_eq!(state.users["bob"].anchor.as_deref(), Some(ids[3].as_str()));
    assert_eq!(state.users["bob"].focus.as_deref(), Some(ids[3].as_str()));
}

#[test]
fn test_half_removed_span_snaps_lower_endpoint_to_previous() {
    let doc = factory::document_with_items(
        "doc",
        vec![
            factory::paragraph("a"),
            factory::paragraph("b"),
            factory::paragraph("c"),
            factory::paragraph("d"),
        ],
    );
    let ids: Vec<String> = doc.items.iter().map(|i| i.id.clone()).collect();
    let mut state = EditorState::new(doc);
    state.add_user("alice");
    state.add_user("bob");

    // alice removes b..c; bob's span is a..b, so its lower endpoint vanishes
    select(&mut state, "alice", &ids[1], &ids[2]);
    select(&mut state, "bob", &ids[0], &ids[1]);

    Usecases::new(&mut state, "alice").remove();

    assert_eq!(state.users["bob"].anchor.as_deref(), Some(ids[0].as_str()));
    assert_eq!(state.users["bob"].focus.as_deref(), Some(ids[0].as_str()));
}

#[test]
fn test_insert_mode_selection_on_removed_item_is_redirected_and_cleared() {
    let (mut state, ids) = three_paragraphs();
    let run = state.document.items[1].runs()[0].id.clone();
    select(&mut state, "alice", &ids[1], &ids[1]);
    state
        .users
        .get_mut("bob")
        .unwrap()
        .collapse_to_caret(ids[1].clone(), RangePoint::new(run, 1));

    Usecases::new(&mut state, "alice").remove();

    let bob = &state.users["bob"];
    assert_eq!(bob.anchor.as_deref(), Some(ids[2].as_str()));
    assert!(bob.range.is_none(), "a text range cannot survive its item's removal");
}
