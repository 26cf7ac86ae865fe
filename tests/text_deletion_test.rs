// Offset adjustment on text deletion: endpoints before the cut stay,
// endpoints inside clamp to its start, endpoints past it shift left.

use std::collections::BTreeSet;

use outline_editor_wasm::models::factory;
use outline_editor_wasm::{Decoration, EditorState, Range, RangePoint, Usecases};

fn caret(state: &mut EditorState, user: &str, item: &str, run: &str, offset: usize) {
    state
        .users
        .get_mut(user)
        .unwrap()
        .collapse_to_caret(item, RangePoint::new(run, offset));
}

fn span(state: &mut EditorState, user: &str, item: &str, from: (&str, usize), to: (&str, usize)) {
    let selection = state.users.get_mut(user).unwrap();
    selection.collapse_to_item(item);
    selection.range = Some(Range::new(
        RangePoint::new(from.0, from.1),
        RangePoint::new(to.0, to.1),
    ));
}

fn point_of<'a>(state: &'a EditorState, user: &str) -> &'a RangePoint {
    &state.users[user].range.as_ref().unwrap().anchor
}

#[test]
fn test_single_run_deletion_clamps_and_shifts() {
    let doc = factory::document_with_items("doc", vec![factory::paragraph("ABCDEFGHI")]);
    let item = doc.items[0].id.clone();
    let run = doc.items[0].runs()[0].id.clone();
    let mut state = EditorState::new(doc);
    for user in ["alice", "bob", "carol", "dave"] {
        state.add_user(user);
    }

    span(&mut state, "alice", &item, (&run, 3), (&run, 7));
    caret(&mut state, "bob", &item, &run, 8);
    caret(&mut state, "carol", &item, &run, 5);
    caret(&mut state, "dave", &item, &run, 2);

    Usecases::new(&mut state, "alice").remove();

    assert_eq!(state.document.items[0].plain_text(), "ABCHI");
    assert_eq!(point_of(&state, "alice").offset, 3, "the cut collapses to its start");
    assert!(state.users["alice"].range.as_ref().unwrap().is_collapsed());
    assert_eq!(point_of(&state, "bob").offset, 4, "past the cut shifts by its length");
    assert_eq!(point_of(&state, "carol").offset, 3, "inside the cut clamps to its start");
    assert_eq!(point_of(&state, "dave").offset, 2, "before the cut is untouched");
}

#[test]
fn test_backwards_span_deletes_the_same_cut() {
    let doc = factory::document_with_items("doc", vec![factory::paragraph("ABCDEFGHI")]);
    let item = doc.items[0].id.clone();
    let run = doc.items[0].runs()[0].id.clone();
    let mut state = EditorState::new(doc);
    state.add_user("alice");

    // focus before anchor
    span(&mut state, "alice", &item, (&run, 7), (&run, 3));
    Usecases::new(&mut state, "alice").remove();

    assert_eq!(state.document.items[0].plain_text(), "ABCHI");
    assert_eq!(point_of(&state, "alice").offset, 3);
}

#[test]
fn test_cross_run_deletion_repoints_into_the_cut() {
    let bold = BTreeSet::from([Decoration::Bold]);
    let italic = BTreeSet::from([Decoration::Italic]);
    let runs = vec![
        factory::plain_run("Hello "),
        factory::run("brave ", bold),
        factory::run("new ", italic),
        factory::plain_run("world"),
    ];
    let ids: Vec<String> = runs.iter().map(|r| r.id.clone()).collect();
    let doc =
        factory::document_with_items("doc", vec![factory::paragraph_with_runs(runs)]);
    let item = doc.items[0].id.clone();
    let mut state = EditorState::new(doc);
    for user in ["alice", "bob", "carol"] {
        state.add_user(user);
    }

    span(&mut state, "alice", &item, (&ids[0], 3), (&ids[3], 2));
    caret(&mut state, "bob", &item, &ids[1], 4); // inside a fully deleted run
    caret(&mut state, "carol", &item, &ids[3], 4); // past the cut in the end run

    Usecases::new(&mut state, "alice").remove();

    // start run keeps "Hel", end run keeps "rld"; identical (empty) mark
    // sets, so normalization merges them into one run
    let item_ref = &state.document.items[0];
    assert_eq!(item_ref.plain_text(), "Helrld");
    assert_eq!(item_ref.runs().len(), 1);

    let surviving = item_ref.runs()[0].id.clone();
    let alice = point_of(&state, "alice");
    assert_eq!((alice.id.as_str(), alice.offset), (surviving.as_str(), 3));
    let bob = point_of(&state, "bob");
    assert_eq!((bob.id.as_str(), bob.offset), (surviving.as_str(), 3));
    let carol = point_of(&state, "carol");
    assert_eq!(
        (carol.id.as_str(), carol.offset),
        (surviving.as_str(), 5),
        "an endpoint past the end-run cut keeps its distance from the cut"
    );
}

#[test]
fn test_remove_char_deletes_before_the_caret() {
    let doc = factory::document_with_items("doc", vec![factory::paragraph("ABC")]);
    let item = doc.items[0].id.clone();
    let run = doc.items[0].runs()[0].id.clone();
    let mut state = EditorState::new(doc);
    state.add_user("alice");
    state.add_user("bob");

    caret(&mut state, "alice", &item, &run, 2);
    caret(&mut state, "bob", &item, &run, 3);

    Usecases::new(&mut state, "alice").remove();

    assert_eq!(state.document.items[0].plain_text(), "AC");
    assert_eq!(point_of(&state, "alice").offset, 1);
    assert_eq!(point_of(&state, "bob").offset, 2);
}

#[test]
fn test_remove_char_at_run_boundary_reaches_previous_run() {
    let bold = BTreeSet::from([Decoration::Bold]);
    let runs = vec![factory::plain_run("AB"), factory::run("CD", bold)];
    let first = runs[0].id.clone();
    let second = runs[1].id.clone();
    let doc =
        factory::document_with_items("doc", vec![factory::paragraph_with_runs(runs)]);
    let item = doc.items[0].id.clone();
    let mut state = EditorState::new(doc);
    state.add_user("alice");

    caret(&mut state, "alice", &item, &second, 0);
    Usecases::new(&mut state, "alice").remove();

    assert_eq!(state.document.items[0].plain_text(), "ACD");
    assert_eq!(state.document.items[0].runs()[0].id, first);
    let alice = point_of(&state, "alice");
    assert_eq!((alice.id.as_str(), alice.offset), (second.as_str(), 0));
}

#[test]
fn test_remove_with_null_range_and_no_selection_is_noop() {
    let doc = factory::document_with_items("doc", vec![factory::paragraph("ABC")]);
    let mut state = EditorState::new(doc);
    state.add_user("alice");
    state.users.get_mut("alice").unwrap().clear();
    let before = state.clone();

    Usecases::new(&mut state, "nobody").remove();
    assert_eq!(state, before);
}
