use serde_json::{Map, Value};

/// One item record in a list field's array value.
pub type Record = Map<String, Value>;

/// The form's value tree: the single mutation authority for everything a
/// rendered form displays.
///
/// Paths are dotted strings whose segments address object keys or array
/// indices, e.g. `gallery.2.caption` is the `caption` key of the third entry
/// of the `gallery` array.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    values: Value,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    pub fn new() -> Self {
        Self {
            values: Value::Object(Map::new()),
        }
    }

    /// Build a form around an existing value tree. Non-object roots are
    /// replaced by an empty record.
    pub fn from_values(values: Value) -> Self {
        let values = match values {
            Value::Object(map) => Value::Object(map),
            _ => Value::Object(Map::new()),
        };
        Self { values }
    }

    pub fn values(&self) -> &Value {
        &self.values
    }

    pub fn into_values(self) -> Value {
        self.values
    }

    /// Resolve the value at `path`, or `None` if any segment is missing.
    pub fn value_at(&self, path: &str) -> Option<&Value> {
        let mut current = &self.values;
        for segment in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// The array value at `path`. An absent or non-array value reads as an
    /// empty list.
    pub fn items(&self, path: &str) -> &[Value] {
        self.value_at(path)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Write `value` at `path`. Every segment but the last must already
    /// exist; the final object key is created if missing.
    pub fn set(&mut self, path: &str, value: Value) -> Result<(), FormError> {
        let slot = slot_mut(&mut self.values, path, true)?;
        *slot = value;
        Ok(())
    }

    /// Insert `record` at `index` of the array at `path`, creating the array
    /// if the field has no value yet.
    pub fn insert(&mut self, path: &str, index: usize, record: Value) -> Result<(), FormError> {
        let items = self.array_mut(path, true)?;
        if index > items.len() {
            return Err(FormError::OutOfBounds {
                path: path.to_string(),
                index,
                len: items.len(),
            });
        }
        items.insert(index, record);
        Ok(())
    }

    /// Remove and return the entry at `index` of the array at `path`.
    pub fn remove(&mut self, path: &str, index: usize) -> Result<Value, FormError> {
        let items = self.array_mut(path, false)?;
        if index >= items.len() {
            return Err(FormError::OutOfBounds {
                path: path.to_string(),
                index,
                len: items.len(),
            });
        }
        Ok(items.remove(index))
    }

    /// Move the entry at `from` to `to` with standard array-move semantics:
    /// the entry is lifted out and re-inserted, shifting everything between
    /// the two positions by one.
    pub fn move_item(&mut self, path: &str, from: usize, to: usize) -> Result<(), FormError> {
        let items = self.array_mut(path, false)?;
        let len = items.len();
        if from >= len || to >= len {
            return Err(FormError::OutOfBounds {
                path: path.to_string(),
                index: from.max(to),
                len,
            });
        }
        if from != to {
            let item = items.remove(from);
            items.insert(to, item);
        }
        Ok(())
    }

    fn array_mut(&mut self, path: &str, create: bool) -> Result<&mut Vec<Value>, FormError> {
        let slot = slot_mut(&mut self.values, path, create)?;
        if create && slot.is_null() {
            *slot = Value::Array(Vec::new());
        }
        match slot {
            Value::Array(items) => Ok(items),
            _ => Err(FormError::NotAnArray(path.to_string())),
        }
    }
}

/// Walk to the slot addressed by `path`. With `create`, a missing final
/// object key gets a `Null` placeholder so the caller can initialize it in
/// place; without it, the walk is read-only and a failure leaves the tree
/// untouched.
fn slot_mut<'a>(root: &'a mut Value, path: &str, create: bool) -> Result<&'a mut Value, FormError> {
    if path.is_empty() {
        return Err(FormError::InvalidPath("empty path".to_string()));
    }

    let mut current = root;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        let last = segments.peek().is_none();
        current = match current {
            Value::Object(map) => {
                if create && last && !map.contains_key(segment) {
                    map.insert(segment.to_string(), Value::Null);
                }
                map.get_mut(segment).ok_or_else(|| {
                    FormError::InvalidPath(format!("missing key `{segment}` in `{path}`"))
                })?
            }
            Value::Array(items) => {
                let index = segment.parse::<usize>().map_err(|_| {
                    FormError::InvalidPath(format!("non-numeric index `{segment}` in `{path}`"))
                })?;
                let len = items.len();
                items.get_mut(index).ok_or(FormError::OutOfBounds {
                    path: path.to_string(),
                    index,
                    len,
                })?
            }
            _ => {
                return Err(FormError::InvalidPath(format!(
                    "`{segment}` addresses into a leaf in `{path}`"
                )));
            }
        };
    }
    Ok(current)
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    InvalidPath(String),
    NotAnArray(String),
    OutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },
}
