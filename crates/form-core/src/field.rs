use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type FieldAttrs = BTreeMap<String, Value>;

/// Descriptor for one editable value in a form schema.
///
/// `name` is the field's path segment inside the form's value tree. For a
/// group-list field, `fields` describes the shape of one item and
/// `default_item` is the record inserted when the user adds an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub component: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_item: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(flatten)]
    pub attrs: FieldAttrs,
}

impl Field {
    pub fn new(name: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            component: component.into(),
            default_item: None,
            fields: Vec::new(),
            attrs: FieldAttrs::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn default_item(mut self, default_item: Value) -> Self {
        self.default_item = Some(default_item);
        self
    }

    pub fn fields(mut self, fields: impl Into<Vec<Field>>) -> Self {
        self.fields = fields.into();
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attrs.insert(key.into(), value);
        self
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Human-readable title for one list entry: the item's non-empty `alt`
    /// value if it has one, otherwise `<label or name> Item`.
    pub fn item_title(&self, item: &Value) -> String {
        match item.get("alt").and_then(Value::as_str) {
            Some(alt) if !alt.is_empty() => alt.to_string(),
            _ => format!("{} Item", self.display_label()),
        }
    }

    /// Clone the sub-field template with every name qualified by this list's
    /// name and the item's index, so a generic renderer addresses the right
    /// slot in the value tree (`gallery` + index 2 + `caption` gives
    /// `gallery.2.caption`).
    pub fn namespaced_fields(&self, index: usize) -> Vec<Field> {
        self.fields
            .iter()
            .map(|sub_field| {
                let mut sub_field = sub_field.clone();
                sub_field.name = format!("{}.{index}.{}", self.name, sub_field.name);
                sub_field
            })
            .collect()
    }
}
