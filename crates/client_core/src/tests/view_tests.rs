use super::*;

fn record(id: &str, name: &str, age: u32, email: &str) -> StudentRecord {
    StudentRecord {
        id: StudentId::from(id),
        name: name.into(),
        age,
        email: email.into(),
    }
}

fn roster() -> Vec<StudentRecord> {
    vec![
        record("a", "Dinesh", 20, "dinesh@example.com"),
        record("b", "Kumar", 22, "kumar@example.com"),
        record("c", "Ravi", 19, "ravi@x.com"),
    ]
}

fn row_names(rows: &[RowView]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| match row {
            RowView::Student(row) => Some(row.name.clone()),
            RowView::Placeholder { .. } => None,
        })
        .collect()
}

#[test]
fn escapes_all_five_markup_characters() {
    assert_eq!(
        escape_html(r#"<b a="x">Tom & 'Jerry'</b>"#),
        "&lt;b a=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
    );
    assert!(matches!(escape_html("plain"), Cow::Borrowed("plain")));
}

#[test]
fn terminal_escaper_neutralizes_control_characters() {
    let escaped = TerminalEscaper.escape("evil\u{1b}[31mred\r");
    assert!(!escaped.chars().any(char::is_control));
    assert!(escaped.contains("\\u{1b}"));
    assert!(matches!(TerminalEscaper.escape("Kumar"), Cow::Borrowed(_)));
}

#[test]
fn blank_query_shows_everything_in_store_order() {
    let rows = render_rows(&roster(), "  ", &HtmlEscaper);
    assert_eq!(row_names(&rows), ["Dinesh", "Kumar", "Ravi"]);
}

#[test]
fn search_is_case_insensitive_on_name_or_email() {
    let rows = render_rows(&roster(), "KUM", &HtmlEscaper);
    assert_eq!(row_names(&rows), ["Kumar"]);

    let rows = render_rows(&roster(), "x.com", &HtmlEscaper);
    assert_eq!(row_names(&rows), ["Ravi"]);

    let rows = render_rows(&roster(), "EXAMPLE", &HtmlEscaper);
    assert_eq!(row_names(&rows), ["Dinesh", "Kumar"]);
}

#[test]
fn no_match_yields_single_placeholder() {
    let rows = render_rows(&roster(), "zzz", &HtmlEscaper);
    assert_eq!(
        rows,
        vec![RowView::Placeholder {
            message: NO_RESULTS_MESSAGE
        }]
    );
    assert_eq!(render_rows(&[], "", &HtmlEscaper).len(), 1);
}

#[test]
fn rows_carry_escaped_text() {
    let records = vec![record("x", "<script>", 30, "a&b@x.com")];
    let rows = render_rows(&records, "", &HtmlEscaper);
    match &rows[0] {
        RowView::Student(row) => {
            assert_eq!(row.name, "&lt;script&gt;");
            assert_eq!(row.email, "a&amp;b@x.com");
            assert_eq!(row.age, 30);
        }
        other => panic!("expected a student row, got {other:?}"),
    }
}

#[test]
fn search_matches_raw_text_not_escaped_text() {
    let records = vec![record("x", "Tom & Jerry", 30, "tj@x.com")];
    assert_eq!(row_names(&render_rows(&records, "amp", &HtmlEscaper)).len(), 0);
    assert_eq!(row_names(&render_rows(&records, "& j", &HtmlEscaper)).len(), 1);
}

#[test]
fn tbody_markup_has_actions_and_placeholder() {
    let html = render_tbody_html(&roster(), "ravi");
    assert!(html.contains("<td>Ravi</td><td>19</td><td>ravi@x.com</td>"));
    assert!(html.contains(r#"<button data-id="c" class="edit-btn">Edit</button>"#));
    assert!(html.contains(r#"<button data-id="c" class="delete-btn">Delete</button>"#));
    assert_eq!(html.matches("<tr>").count(), 1);

    let empty = render_tbody_html(&roster(), "nobody");
    assert_eq!(empty, "<tr><td colspan=\"4\">No students found.</td></tr>\n");
}
