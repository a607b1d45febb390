//! Create/edit form state machine.

use serde::Serialize;
use shared::{
    domain::{StudentFields, StudentId, StudentRecord},
    error::ValidationError,
    validation::validate_fields,
};

pub const ADD_LABEL: &str = "Add Student";
pub const UPDATE_LABEL: &str = "Update Student";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Idle,
    Editing(StudentId),
}

/// Raw text as typed; nothing here has been validated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FormFields {
    pub name: String,
    pub age: String,
    pub email: String,
}

impl FormFields {
    pub fn from_record(record: &StudentRecord) -> Self {
        Self {
            name: record.name.clone(),
            age: record.age.to_string(),
            email: record.email.clone(),
        }
    }
}

/// What a valid submit asks the store to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(StudentFields),
    Update(StudentId, StudentFields),
}

/// Snapshot of the form as a host should draw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub fields: FormFields,
    pub editing: Option<StudentId>,
    pub submit_label: &'static str,
    pub cancel_visible: bool,
}

#[derive(Debug, Default)]
pub struct FormController {
    mode: FormMode,
    fields: FormFields,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn editing_id(&self) -> Option<&StudentId> {
        match &self.mode {
            FormMode::Idle => None,
            FormMode::Editing(id) => Some(id),
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.fields.name = value.into();
    }

    pub fn set_age(&mut self, value: impl Into<String>) {
        self.fields.age = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.fields.email = value.into();
    }

    /// `Idle | Editing(_) -> Editing(record.id)`, copying the record into the fields.
    pub fn start_edit(&mut self, record: &StudentRecord) {
        self.fields = FormFields::from_record(record);
        self.mode = FormMode::Editing(record.id.clone());
    }

    /// Back to `Idle` with empty fields; also used for cancel.
    pub fn reset(&mut self) {
        self.mode = FormMode::Idle;
        self.fields = FormFields::default();
    }

    /// Validates the current fields. On success the form resets and the
    /// requested mutation is returned; on failure nothing changes.
    pub fn submit(&mut self) -> Result<Submission, ValidationError> {
        let fields = validate_fields(&self.fields.name, &self.fields.age, &self.fields.email)?;
        let submission = match std::mem::take(&mut self.mode) {
            FormMode::Idle => Submission::Create(fields),
            FormMode::Editing(id) => Submission::Update(id, fields),
        };
        self.fields = FormFields::default();
        Ok(submission)
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Idle => ADD_LABEL,
            FormMode::Editing(_) => UPDATE_LABEL,
        }
    }

    pub fn view(&self) -> FormView {
        FormView {
            fields: self.fields.clone(),
            editing: self.editing_id().cloned(),
            submit_label: self.submit_label(),
            cancel_visible: self.editing_id().is_some(),
        }
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
