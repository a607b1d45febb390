//! Commands a host sends to the roster controller and the events it gets back.

use shared::{
    domain::{SortMode, StudentId},
    error::ValidationError,
};

use crate::{form::FormView, view::RowView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterCommand {
    SetName(String),
    SetAge(String),
    SetEmail(String),
    Submit,
    StartEdit(StudentId),
    CancelEdit,
    /// First half of deletion; answered by `ConfirmDelete` or `CancelDelete`.
    RequestDelete(StudentId),
    ConfirmDelete,
    CancelDelete,
    Search(String),
    SetSort(SortMode),
}

impl RosterCommand {
    pub fn name(&self) -> &'static str {
        match self {
            RosterCommand::SetName(_) => "set_name",
            RosterCommand::SetAge(_) => "set_age",
            RosterCommand::SetEmail(_) => "set_email",
            RosterCommand::Submit => "submit",
            RosterCommand::StartEdit(_) => "start_edit",
            RosterCommand::CancelEdit => "cancel_edit",
            RosterCommand::RequestDelete(_) => "request_delete",
            RosterCommand::ConfirmDelete => "confirm_delete",
            RosterCommand::CancelDelete => "cancel_delete",
            RosterCommand::Search(_) => "search",
            RosterCommand::SetSort(_) => "set_sort",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    /// Submission rejected; the form keeps what was typed.
    Alert(ValidationError),
    /// A submit changed the store; `created` is false for updates.
    Saved { id: StudentId, created: bool },
    FormChanged(FormView),
    ConfirmationRequested { id: StudentId, prompt: String },
    Rendered(Vec<RowView>),
}

pub fn delete_prompt(name: &str, email: &str) -> String {
    format!("Delete \"{name}\" ({email}) ?")
}
