//! Decoding of the `/show` listing.
//!
//! The legacy service renders its listing as display text:
//!
//! ```text
//! Current Gradebook:<br>Math: 90<br>Science: 85<br>
//! ```
//!
//! That format is kept as-is for compatibility. A service that answers with
//! `application/json` is read as an ordered array of `{name, grade}` objects
//! instead.

use crate::models::{parse_grade, ListingEntry, SubjectRecord};

pub const EMPTY_SENTINEL: &str = "The gradebook is currently empty";
const HEADER_MARKER: &str = "Current Gradebook";
const LINE_BREAK: &str = "<br>";

pub fn parse_listing(body: &str) -> Vec<SubjectRecord> {
    if body.contains(EMPTY_SENTINEL) {
        return Vec::new();
    }

    body.split(LINE_BREAK)
        .filter(|line| line.contains(':') && !line.contains(HEADER_MARKER))
        .enumerate()
        .map(|(id, line)| {
            let (name, grade) = match line.split_once(": ") {
                Some((name, rest)) => {
                    let grade = rest.split(": ").next().unwrap_or(rest);
                    (name, parse_grade(grade))
                }
                None => (line, f64::NAN),
            };
            SubjectRecord {
                id,
                name: name.trim().to_string(),
                grade,
            }
        })
        .collect()
}

pub fn parse_structured(body: &str) -> serde_json::Result<Vec<SubjectRecord>> {
    let entries: Vec<ListingEntry> = serde_json::from_str(body)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(id, entry)| SubjectRecord {
            id,
            name: entry.name.trim().to_string(),
            grade: entry.grade,
        })
        .collect())
}

/// Picks the decoder from the response content type.
pub fn decode(content_type: Option<&str>, body: &str) -> serde_json::Result<Vec<SubjectRecord>> {
    let is_json = content_type
        .map(|value| value.trim_start().starts_with("application/json"))
        .unwrap_or(false);
    if is_json {
        parse_structured(body)
    } else {
        Ok(parse_listing(body))
    }
}
