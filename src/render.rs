use std::fmt::Write;

use crate::app::GradebookApp;
use crate::client::GradebookService;
use crate::models::SubjectRecord;

pub fn render_view<S: GradebookService>(app: &GradebookApp<S>, api_url: &str) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# My Gradebook");
    let _ = writeln!(output, "Connected to: {api_url}");
    if let Some(message) = app.message() {
        let _ = writeln!(output, "! {message}");
    }
    let _ = writeln!(output);

    let (subject, grade) = app.inputs();
    let _ = writeln!(output, "## Add New Subject");
    if app.is_busy() {
        let _ = writeln!(output, "Adding...");
    } else if !subject.is_empty() || !grade.is_empty() {
        let _ = writeln!(output, "Pending: {subject} / {grade}");
    }
    let _ = writeln!(output);

    let _ = write!(output, "{}", render_listing(app));
    output
}

pub fn render_listing<S: GradebookService>(app: &GradebookApp<S>) -> String {
    let mut output = String::new();
    let subjects = app.subjects();

    let _ = writeln!(output, "## Subjects ({})", subjects.len());
    if subjects.is_empty() {
        let _ = writeln!(output, "No subjects added yet. Add one above!");
        return output;
    }

    let editing = app.editing();
    for record in subjects {
        match editing {
            Some(session) if session.id == record.id => {
                let _ = writeln!(
                    output,
                    "[{}] {}  editing: {}",
                    record.id, record.name, session.staged_grade
                );
            }
            _ => {
                let _ = writeln!(output, "{}", render_record(record));
            }
        }
    }
    output
}

fn render_record(record: &SubjectRecord) -> String {
    format!("[{}] {}  {}%", record.id, record.name, record.grade)
}
