use std::rc::Rc;

use gpui_forms_core::{Field, GroupListController};
use serde_json::json;

fn gallery() -> Field {
    Field::new("gallery", "group-list").fields([
        Field::new("caption", "text").label("Caption"),
        Field::new("src", "image").attr("clearable", json!(true)),
    ])
}

#[test]
fn names_are_qualified_by_list_and_index() {
    let fields = gallery().namespaced_fields(2);
    assert_eq!(fields[0].name, "gallery.2.caption");
    assert_eq!(fields[1].name, "gallery.2.src");
}

#[test]
fn other_descriptor_attributes_are_preserved() {
    let fields = gallery().namespaced_fields(0);
    assert_eq!(fields[0].label.as_deref(), Some("Caption"));
    assert_eq!(fields[0].component, "text");
    assert_eq!(fields[1].attrs.get("clearable"), Some(&json!(true)));
}

#[test]
fn template_without_sub_fields_namespaces_to_nothing() {
    let fields = Field::new("gallery", "group-list").namespaced_fields(0);
    assert!(fields.is_empty());
}

#[test]
fn controller_memoizes_per_index() {
    let mut list = GroupListController::new(gallery());

    let first = list.namespaced_fields(1);
    let again = list.namespaced_fields(1);
    let other = list.namespaced_fields(2);

    assert!(Rc::ptr_eq(&first, &again));
    assert!(!Rc::ptr_eq(&first, &other));
    assert_eq!(other[0].name, "gallery.2.caption");
}

#[test]
fn replacing_the_template_invalidates_the_memo() {
    let mut list = GroupListController::new(gallery());
    let before = list.namespaced_fields(0);
    assert_eq!(before[0].name, "gallery.0.caption");

    list.set_field(Field::new("slides", "group-list").fields([Field::new("caption", "text")]));
    let after = list.namespaced_fields(0);
    assert_eq!(after[0].name, "slides.0.caption");
}
