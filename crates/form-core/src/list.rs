use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use serde_json::{Map, Value};

use crate::field::Field;
use crate::form::{Form, FormError};

/// Stable identity for one list entry.
///
/// Array positions shift on every insert, remove, and reorder, so per-item
/// UI state (expansion, drag identity) is keyed by a token minted when the
/// record enters the list instead of by index. Position is resolved from the
/// token at mutation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemToken(u64);

/// An in-flight drag gesture. Created by [`GroupListController::begin_drag`]
/// and consumed by either `complete_drag` or `cancel_drag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub token: ItemToken,
    pub from: usize,
}

/// A committed reorder, reported after a completed drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupListReorder {
    pub token: ItemToken,
    pub from: usize,
    pub to: usize,
}

/// Orchestrates one group-list field: add/remove/reorder against the form's
/// array value, plus the per-item state the rendered rows need.
///
/// The controller never touches the array directly; every data mutation goes
/// through the [`Form`] so displayed and authoritative order cannot diverge.
pub struct GroupListController {
    field: Field,
    tokens: Vec<ItemToken>,
    expanded: HashSet<ItemToken>,
    drag: Option<DragSession>,
    next_token: u64,
    // Namespaced sub-fields depend only on (template, index), so entries
    // stay valid across item mutations and are dropped when the template is
    // replaced.
    namespaced: HashMap<usize, Rc<[Field]>>,
}

impl GroupListController {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            tokens: Vec::new(),
            expanded: HashSet::new(),
            drag: None,
            next_token: 0,
            namespaced: HashMap::new(),
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Replace the field template. Drops the namespaced-field cache and all
    /// per-item state: a new template describes a different list.
    pub fn set_field(&mut self, field: Field) {
        self.field = field;
        self.tokens.clear();
        self.expanded.clear();
        self.drag = None;
        self.namespaced.clear();
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token_at(&self, index: usize) -> Option<ItemToken> {
        self.tokens.get(index).copied()
    }

    pub fn index_of(&self, token: ItemToken) -> Option<usize> {
        self.tokens.iter().position(|t| *t == token)
    }

    /// Align the token list with the form's current array length.
    ///
    /// Mutations that flow through this controller keep tokens exact; after
    /// an external mutation only the length can be reconciled, so surplus
    /// slots are dropped from the tail and new slots appended.
    pub fn sync_with(&mut self, form: &Form) {
        self.sync_len(form.items(&self.field.name).len());
    }

    pub fn sync_len(&mut self, len: usize) {
        while self.tokens.len() > len {
            let token = self.tokens.pop();
            if let Some(token) = token {
                self.expanded.remove(&token);
                if self.drag.map(|d| d.token) == Some(token) {
                    self.drag = None;
                }
            }
        }
        while self.tokens.len() < len {
            let token = self.mint_token();
            self.tokens.push(token);
        }
    }

    /// Insert the field's `default_item` (or an empty record) at position 0.
    pub fn add_item(&mut self, form: &mut Form) -> Result<ItemToken, FormError> {
        self.sync_with(form);
        let record = self
            .field
            .default_item
            .clone()
            .unwrap_or_else(|| Value::Object(Map::new()));
        form.insert(&self.field.name, 0, record)?;
        let token = self.mint_token();
        self.tokens.insert(0, token);
        Ok(token)
    }

    /// Remove the entry the token currently points at, resolving the index
    /// at call time. A token that no longer resolves is a no-op (`Ok(None)`).
    pub fn remove_item(
        &mut self,
        token: ItemToken,
        form: &mut Form,
    ) -> Result<Option<Value>, FormError> {
        self.sync_with(form);
        let Some(index) = self.index_of(token) else {
            return Ok(None);
        };
        let removed = form.remove(&self.field.name, index)?;
        self.tokens.remove(index);
        self.expanded.remove(&token);
        if self.drag.map(|d| d.token) == Some(token) {
            self.drag = None;
        }
        Ok(Some(removed))
    }

    pub fn is_expanded(&self, token: ItemToken) -> bool {
        self.expanded.contains(&token)
    }

    /// Open one item's detail panel. Other panels stay as they are; the list
    /// is deliberately not an accordion.
    pub fn expand(&mut self, token: ItemToken) {
        if self.index_of(token).is_some() {
            self.expanded.insert(token);
        }
    }

    pub fn collapse(&mut self, token: ItemToken) {
        self.expanded.remove(&token);
    }

    pub fn drag(&self) -> Option<DragSession> {
        self.drag
    }

    pub fn dragging_token(&self) -> Option<ItemToken> {
        self.drag.map(|d| d.token)
    }

    /// Start a drag gesture for the given item. Returns `false` when the
    /// token does not resolve to a position.
    pub fn begin_drag(&mut self, token: ItemToken) -> bool {
        let Some(from) = self.index_of(token) else {
            return false;
        };
        self.drag = Some(DragSession { token, from });
        true
    }

    /// Abandon the in-flight drag without mutating anything.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Finish the in-flight drag. A missing destination (or no active drag)
    /// leaves the array untouched; otherwise the record moves to
    /// `destination` through the form's move operation and its token moves
    /// alongside, so expansion state travels with the record.
    pub fn complete_drag(
        &mut self,
        destination: Option<usize>,
        form: &mut Form,
    ) -> Result<Option<GroupListReorder>, FormError> {
        let Some(session) = self.drag.take() else {
            return Ok(None);
        };
        let Some(to) = destination else {
            return Ok(None);
        };
        self.sync_with(form);
        let Some(from) = self.index_of(session.token) else {
            return Ok(None);
        };
        let to = to.min(self.tokens.len().saturating_sub(1));
        if from == to {
            return Ok(None);
        }
        form.move_item(&self.field.name, from, to)?;
        let token = self.tokens.remove(from);
        self.tokens.insert(to, token);
        Ok(Some(GroupListReorder { token, from, to }))
    }

    /// Finish the drag by dropping onto the entry at `target_ix`: the
    /// dragged record takes that position, landing above the target when
    /// moving up and below it when moving down (standard array-move
    /// semantics).
    pub fn complete_drag_at(
        &mut self,
        target_ix: usize,
        form: &mut Form,
    ) -> Result<Option<GroupListReorder>, FormError> {
        self.complete_drag(Some(target_ix), form)
    }

    /// Finish the drag by dropping past the last entry; the record moves to
    /// the tail of the list.
    pub fn complete_drag_to_end(
        &mut self,
        form: &mut Form,
    ) -> Result<Option<GroupListReorder>, FormError> {
        self.sync_with(form);
        let tail = self.tokens.len().saturating_sub(1);
        self.complete_drag(Some(tail), form)
    }

    /// Title for the entry currently at `index`.
    pub fn item_title(&self, form: &Form, index: usize) -> String {
        let items = form.items(&self.field.name);
        self.field
            .item_title(items.get(index).unwrap_or(&Value::Null))
    }

    /// The namespaced sub-field descriptors for the entry at `index`,
    /// memoized per index until the template is replaced.
    pub fn namespaced_fields(&mut self, index: usize) -> Rc<[Field]> {
        if let Some(cached) = self.namespaced.get(&index) {
            return Rc::clone(cached);
        }
        let fields: Rc<[Field]> = self.field.namespaced_fields(index).into();
        self.namespaced.insert(index, Rc::clone(&fields));
        fields
    }

    fn mint_token(&mut self) -> ItemToken {
        let token = ItemToken(self.next_token);
        self.next_token += 1;
        token
    }
}
