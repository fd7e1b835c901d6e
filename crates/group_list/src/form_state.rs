use gpui_forms_core::Form;

/// UI-side owner of a [`Form`]. The group list and the sub-field renderer
/// share one `Entity<FormState>` so every mutation lands in the same value
/// tree, which stays the single source of truth for item data and order.
pub struct FormState {
    form: Form,
}

impl FormState {
    pub fn new(form: Form) -> Self {
        Self { form }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }
}
