use gpui_forms_core::{Field, Form, GroupListController};
use serde_json::json;

#[test]
fn alt_value_wins_when_present() {
    let field = Field::new("gallery", "group-list").label("Images");
    assert_eq!(field.item_title(&json!({ "alt": "Cover" })), "Cover");
}

#[test]
fn empty_alt_falls_back_to_label() {
    let field = Field::new("gallery", "group-list").label("Images");
    assert_eq!(field.item_title(&json!({ "alt": "" })), "Images Item");
}

#[test]
fn missing_alt_falls_back_to_label() {
    let field = Field::new("gallery", "group-list").label("Images");
    assert_eq!(field.item_title(&json!({})), "Images Item");
}

#[test]
fn missing_label_falls_back_to_field_name() {
    let field = Field::new("photos", "group-list");
    assert_eq!(field.item_title(&json!({})), "photos Item");
}

#[test]
fn non_string_alt_is_ignored() {
    let field = Field::new("photos", "group-list");
    assert_eq!(field.item_title(&json!({ "alt": 3 })), "photos Item");
}

#[test]
fn controller_titles_follow_array_order() {
    let form = Form::from_values(json!({
        "photos": [{ "alt": "Cover" }, {}]
    }));
    let mut list = GroupListController::new(Field::new("photos", "group-list"));
    list.sync_with(&form);

    assert_eq!(list.item_title(&form, 0), "Cover");
    assert_eq!(list.item_title(&form, 1), "photos Item");
    // Out-of-range indices still produce a usable fallback.
    assert_eq!(list.item_title(&form, 9), "photos Item");
}
