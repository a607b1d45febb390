//! Roster controller: owns the record store, the form, search and sort state,
//! and turns [`RosterCommand`]s into store mutations and [`RosterEvent`]s.

use shared::domain::{SortMode, StudentId, StudentRecord};
use storage::{KeyValueStore, RecordStore};
use tracing::{debug, info};

pub mod events;
pub mod form;
pub mod view;

pub use events::{delete_prompt, RosterCommand, RosterEvent};
pub use form::{FormController, FormFields, FormMode, FormView, Submission};
pub use view::{
    escape_html, render_rows, render_tbody_html, visible_records, Escaper, HtmlEscaper, RowView,
    StudentRow, TerminalEscaper, NO_RESULTS_MESSAGE,
};

pub struct RosterController<S> {
    store: RecordStore<S>,
    form: FormController,
    sort_mode: SortMode,
    query: String,
    pending_delete: Option<StudentId>,
    escaper: Box<dyn Escaper>,
}

impl<S: KeyValueStore> RosterController<S> {
    /// Takes ownership of a loaded store and applies `sort_mode` to it.
    /// The startup sort is not persisted.
    pub fn new(mut store: RecordStore<S>, sort_mode: SortMode) -> Self {
        store.sort(sort_mode);
        Self {
            store,
            form: FormController::new(),
            sort_mode,
            query: String::new(),
            pending_delete: None,
            escaper: Box::new(HtmlEscaper),
        }
    }

    pub fn with_escaper(mut self, escaper: impl Escaper + 'static) -> Self {
        self.escaper = Box::new(escaper);
        self
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    pub fn records(&self) -> &[StudentRecord] {
        self.store.records()
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn pending_delete(&self) -> Option<&StudentId> {
        self.pending_delete.as_ref()
    }

    pub fn rows(&self) -> Vec<RowView> {
        render_rows(self.store.records(), &self.query, self.escaper.as_ref())
    }

    pub fn visible(&self) -> Vec<&StudentRecord> {
        visible_records(self.store.records(), &self.query).collect()
    }

    pub fn dispatch(&mut self, command: RosterCommand) -> Vec<RosterEvent> {
        debug!(command = command.name(), "roster command");
        match command {
            RosterCommand::SetName(value) => {
                self.form.set_name(value);
                vec![self.form_changed()]
            }
            RosterCommand::SetAge(value) => {
                self.form.set_age(value);
                vec![self.form_changed()]
            }
            RosterCommand::SetEmail(value) => {
                self.form.set_email(value);
                vec![self.form_changed()]
            }
            RosterCommand::Submit => self.submit(),
            RosterCommand::StartEdit(id) => {
                let Some(record) = self.store.get(&id) else {
                    return Vec::new();
                };
                self.form.start_edit(record);
                vec![self.form_changed()]
            }
            RosterCommand::CancelEdit => {
                self.form.reset();
                vec![self.form_changed()]
            }
            RosterCommand::RequestDelete(id) => {
                let Some(record) = self.store.get(&id) else {
                    return Vec::new();
                };
                let prompt = delete_prompt(&record.name, &record.email);
                self.pending_delete = Some(id.clone());
                vec![RosterEvent::ConfirmationRequested { id, prompt }]
            }
            RosterCommand::ConfirmDelete => {
                let Some(id) = self.pending_delete.take() else {
                    return Vec::new();
                };
                if self.store.remove(&id) {
                    info!(%id, "student deleted");
                    self.store.persist();
                }
                vec![self.rendered()]
            }
            RosterCommand::CancelDelete => {
                self.pending_delete = None;
                Vec::new()
            }
            RosterCommand::Search(query) => {
                self.query = query;
                vec![self.rendered()]
            }
            RosterCommand::SetSort(mode) => {
                self.sort_mode = mode;
                self.store.sort(mode);
                self.store.persist();
                vec![self.rendered()]
            }
        }
    }

    fn submit(&mut self) -> Vec<RosterEvent> {
        let submission = match self.form.submit() {
            Ok(submission) => submission,
            Err(error) => {
                debug!(field = error.field(), "submission rejected");
                return vec![RosterEvent::Alert(error)];
            }
        };

        let mut events = Vec::with_capacity(3);
        match submission {
            Submission::Create(fields) => {
                let mut id = StudentId::generate();
                while self.store.contains(&id) {
                    id = StudentId::generate();
                }
                info!(%id, "student added");
                self.store.add(StudentRecord::new(id.clone(), fields));
                events.push(RosterEvent::Saved { id, created: true });
            }
            Submission::Update(id, fields) => {
                if self.store.update(&id, fields) {
                    info!(%id, "student updated");
                    events.push(RosterEvent::Saved { id, created: false });
                }
            }
        }

        self.store.sort(self.sort_mode);
        self.store.persist();
        events.push(self.form_changed());
        events.push(self.rendered());
        events
    }

    fn form_changed(&self) -> RosterEvent {
        RosterEvent::FormChanged(self.form.view())
    }

    fn rendered(&self) -> RosterEvent {
        RosterEvent::Rendered(self.rows())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
