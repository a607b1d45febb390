//! Row view-models for the roster table and the escapers that make them safe to draw.

use std::borrow::Cow;

use serde::Serialize;
use shared::domain::{StudentId, StudentRecord};

pub const NO_RESULTS_MESSAGE: &str = "No students found.";

/// Makes user-supplied text safe for one display target.
pub trait Escaper {
    fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str>;
}

/// Entity-escapes `& < > " '` for markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEscaper;

impl Escaper for HtmlEscaper {
    fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        escape_html(raw)
    }
}

/// Neutralizes control characters (ANSI escapes, carriage returns) for terminals.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalEscaper;

impl Escaper for TerminalEscaper {
    fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        if !raw.chars().any(char::is_control) {
            return Cow::Borrowed(raw);
        }
        let mut out = String::with_capacity(raw.len() + 8);
        for c in raw.chars() {
            if c.is_control() {
                out.extend(c.escape_unicode());
            } else {
                out.push(c);
            }
        }
        Cow::Owned(out)
    }
}

pub fn escape_html(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len() + 16);
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// One data row. `name` and `email` are already escaped for the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRow {
    pub id: StudentId,
    pub name: String,
    pub age: u32,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowView {
    Student(StudentRow),
    Placeholder { message: &'static str },
}

/// Case-insensitive substring match on name or email. Blank queries match everything.
pub fn matches_query(record: &StudentRecord, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty()
        || record.name.to_lowercase().contains(&needle)
        || record.email.to_lowercase().contains(&needle)
}

pub fn visible_records<'a>(
    records: &'a [StudentRecord],
    query: &str,
) -> impl Iterator<Item = &'a StudentRecord> + 'a {
    let needle = query.trim().to_lowercase();
    records
        .iter()
        .filter(move |record| matches_query(record, &needle))
}

/// Projects the (already sorted) store to display rows, or a single placeholder.
pub fn render_rows(
    records: &[StudentRecord],
    query: &str,
    escaper: &dyn Escaper,
) -> Vec<RowView> {
    let rows: Vec<RowView> = visible_records(records, query)
        .map(|record| {
            RowView::Student(StudentRow {
                id: record.id.clone(),
                name: escaper.escape(&record.name).into_owned(),
                age: record.age,
                email: escaper.escape(&record.email).into_owned(),
            })
        })
        .collect();

    if rows.is_empty() {
        return vec![RowView::Placeholder {
            message: NO_RESULTS_MESSAGE,
        }];
    }
    rows
}

/// Table-body markup with per-row Edit/Delete buttons keyed by `data-id`.
pub fn render_tbody_html(records: &[StudentRecord], query: &str) -> String {
    let mut html = String::new();
    for row in render_rows(records, query, &HtmlEscaper) {
        match row {
            RowView::Placeholder { message } => {
                html.push_str(&format!("<tr><td colspan=\"4\">{message}</td></tr>\n"));
            }
            RowView::Student(row) => {
                let id = escape_html(row.id.as_str());
                html.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>\
                     <button data-id=\"{id}\" class=\"edit-btn\">Edit</button> \
                     <button data-id=\"{id}\" class=\"delete-btn\">Delete</button>\
                     </td></tr>\n",
                    row.name, row.age, row.email
                ));
            }
        }
    }
    html
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
