//! Terminal presentation of controller state.

use client_core::{FormView, RowView};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

pub fn rows_table(rows: &[RowView]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Name", "Age", "Email"]);

    for row in rows {
        match row {
            RowView::Student(row) => {
                table.add_row(vec![
                    Cell::new(&row.id),
                    Cell::new(&row.name),
                    Cell::new(row.age),
                    Cell::new(&row.email),
                ]);
            }
            RowView::Placeholder { message } => {
                table.add_row(vec![Cell::new(message)]);
            }
        }
    }

    table.to_string()
}

pub fn form_line(view: &FormView) -> String {
    let mode = match &view.editing {
        Some(id) => format!("editing {id}"),
        None => "new".to_string(),
    };
    format!(
        "[{mode}] name={:?} age={:?} email={:?} (submit: {})",
        view.fields.name, view.fields.age, view.fields.email, view.submit_label
    )
}
