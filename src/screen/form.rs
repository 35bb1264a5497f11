//! Form editing state for the add/edit dialog.

use crate::entity::{Entity, FieldKind, FormField, FormValues, Status, ValidationErrors};

/// Houses the input of an open form dialog.
///
#[derive(Clone, Debug)]
pub struct FormState {
    fields: &'static [FormField],
    values: FormValues,
    focus: usize,
    errors: ValidationErrors,
}

impl FormState {
    /// Returns an empty form with the status toggle set to active.
    ///
    pub fn for_add<E: Entity>() -> Self {
        let mut values = FormValues::new();
        for field in E::form_fields() {
            if field.kind == FieldKind::Toggle {
                values.set(field.key, Status::Active.label());
            }
        }
        FormState::with_values(E::form_fields(), values)
    }

    /// Returns a form prefilled from the record.
    ///
    pub fn for_edit<E: Entity>(record: &E) -> Self {
        FormState::with_values(E::form_fields(), record.to_form())
    }

    fn with_values(fields: &'static [FormField], values: FormValues) -> Self {
        FormState {
            fields,
            values,
            focus: 0,
            errors: ValidationErrors::new(),
        }
    }

    pub fn fields(&self) -> &'static [FormField] {
        self.fields
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn set_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_field(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_previous(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Appends a character to the focused text field. Toggles ignore input.
    ///
    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.focused_field().copied() {
            if field.kind == FieldKind::Toggle {
                return;
            }
            let mut value = self.values.get(field.key).to_owned();
            value.push(c);
            self.values.set(field.key, value);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_field().copied() {
            if field.kind == FieldKind::Toggle {
                return;
            }
            let mut value = self.values.get(field.key).to_owned();
            value.pop();
            self.values.set(field.key, value);
        }
    }

    /// Flips the focused toggle field.
    ///
    pub fn toggle(&mut self) {
        if let Some(field) = self.focused_field().copied() {
            if field.kind == FieldKind::Toggle {
                let status = self.values.status(field.key).toggled();
                self.values.set(field.key, status.label());
            }
        }
    }
}
