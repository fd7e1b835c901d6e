use gpui_forms_core::{Field, Form, GroupListController};
use serde_json::json;

fn list_with(form: &Form) -> GroupListController {
    let field = Field::new("photos", "group-list").fields([Field::new("alt", "text")]);
    let mut list = GroupListController::new(field);
    list.sync_with(form);
    list
}

fn alts(form: &Form) -> Vec<String> {
    form.items("photos")
        .iter()
        .map(|item| item["alt"].as_str().unwrap().to_string())
        .collect()
}

fn photos(alts: &[&str]) -> Form {
    let items: Vec<_> = alts.iter().map(|alt| json!({ "alt": alt })).collect();
    Form::from_values(json!({ "photos": items }))
}

#[test]
fn completed_drag_moves_item_down() {
    let mut form = photos(&["a", "b", "c", "d"]);
    let mut list = list_with(&form);

    let token = list.token_at(1).unwrap();
    assert!(list.begin_drag(token));
    let reorder = list.complete_drag(Some(3), &mut form).unwrap().unwrap();

    assert_eq!((reorder.from, reorder.to), (1, 3));
    assert_eq!(alts(&form), vec!["a", "c", "d", "b"]);
    assert_eq!(list.index_of(token), Some(3));
}

#[test]
fn completed_drag_moves_item_up() {
    let mut form = photos(&["a", "b", "c", "d"]);
    let mut list = list_with(&form);

    let token = list.token_at(3).unwrap();
    assert!(list.begin_drag(token));
    list.complete_drag(Some(1), &mut form).unwrap();

    assert_eq!(alts(&form), vec!["a", "d", "b", "c"]);
    assert_eq!(list.index_of(token), Some(1));
}

#[test]
fn cancelled_drag_mutates_nothing() {
    let mut form = photos(&["a", "b", "c"]);
    let mut list = list_with(&form);

    let token = list.token_at(0).unwrap();
    list.begin_drag(token);
    list.cancel_drag();
    assert!(list.complete_drag(Some(2), &mut form).unwrap().is_none());

    assert_eq!(alts(&form), vec!["a", "b", "c"]);
}

#[test]
fn drop_without_destination_mutates_nothing() {
    let mut form = photos(&["a", "b", "c"]);
    let mut list = list_with(&form);

    let token = list.token_at(0).unwrap();
    list.begin_drag(token);
    assert!(list.complete_drag(None, &mut form).unwrap().is_none());

    assert_eq!(alts(&form), vec!["a", "b", "c"]);
    assert!(list.drag().is_none());
}

#[test]
fn drop_on_own_position_is_noop() {
    let mut form = photos(&["a", "b", "c"]);
    let mut list = list_with(&form);

    let token = list.token_at(1).unwrap();
    list.begin_drag(token);
    assert!(list.complete_drag(Some(1), &mut form).unwrap().is_none());
    assert_eq!(alts(&form), vec!["a", "b", "c"]);
}

#[test]
fn drop_onto_a_row_takes_its_position() {
    let mut form = photos(&["a", "b", "c", "d"]);
    let mut list = list_with(&form);

    // Up: "d" dropped onto "b" lands where "b" was.
    let token = list.token_at(3).unwrap();
    list.begin_drag(token);
    list.complete_drag_at(1, &mut form).unwrap();
    assert_eq!(alts(&form), vec!["a", "d", "b", "c"]);
    assert_eq!(list.index_of(token), Some(1));

    // Down: "a" dropped onto the third row lands below it.
    let token = list.token_at(0).unwrap();
    list.begin_drag(token);
    list.complete_drag_at(2, &mut form).unwrap();
    assert_eq!(alts(&form), vec!["d", "b", "a", "c"]);
}

#[test]
fn drop_onto_own_row_is_a_noop() {
    let mut form = photos(&["a", "b", "c"]);
    let mut list = list_with(&form);

    let token = list.token_at(1).unwrap();
    list.begin_drag(token);
    assert!(list.complete_drag_at(1, &mut form).unwrap().is_none());
    assert_eq!(alts(&form), vec!["a", "b", "c"]);
}

#[test]
fn drop_past_the_last_row_moves_to_the_tail() {
    let mut form = photos(&["a", "b", "c", "d"]);
    let mut list = list_with(&form);

    let token = list.token_at(1).unwrap();
    list.begin_drag(token);
    let reorder = list.complete_drag_to_end(&mut form).unwrap().unwrap();
    assert_eq!((reorder.from, reorder.to), (1, 3));
    assert_eq!(alts(&form), vec!["a", "c", "d", "b"]);

    // The last entry dropped past itself stays put.
    let token = list.token_at(3).unwrap();
    list.begin_drag(token);
    assert!(list.complete_drag_to_end(&mut form).unwrap().is_none());
    assert_eq!(alts(&form), vec!["a", "c", "d", "b"]);
}

#[test]
fn destination_is_clamped_to_list_bounds() {
    let mut form = photos(&["a", "b", "c"]);
    let mut list = list_with(&form);

    let token = list.token_at(0).unwrap();
    list.begin_drag(token);
    list.complete_drag(Some(99), &mut form).unwrap();

    assert_eq!(alts(&form), vec!["b", "c", "a"]);
}

#[test]
fn begin_drag_fails_for_removed_token() {
    let mut form = photos(&["a", "b"]);
    let mut list = list_with(&form);

    let token = list.token_at(0).unwrap();
    list.remove_item(token, &mut form).unwrap();

    assert!(!list.begin_drag(token));
    assert!(list.drag().is_none());
}
