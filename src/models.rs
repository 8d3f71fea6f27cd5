use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectRecord {
    /// Position in the listing it was parsed from. Reassigned on every fetch.
    pub id: usize,
    pub name: String,
    pub grade: f64,
}

/// One entry of a structured `/show` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    pub grade: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddSubject<'a> {
    pub subject: &'a str,
    #[serde(serialize_with = "serialize_grade")]
    pub grade: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateGrade<'a> {
    pub subject: &'a str,
    #[serde(serialize_with = "serialize_grade")]
    pub new_grade: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoveSubject<'a> {
    pub subject: &'a str,
}

/// Parses grade text the lenient way: the longest numeric prefix wins
/// (`"85%"` is 85), and text with no numeric prefix becomes NaN.
pub fn parse_grade(text: &str) -> f64 {
    numeric_prefix(text.trim_start())
        .map(|(value, _)| value)
        .unwrap_or(f64::NAN)
}

/// Parses grade text that must be a number in full, surrounding whitespace
/// aside. NaN is never returned.
pub fn parse_grade_strict(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    match numeric_prefix(trimmed) {
        Some((value, consumed)) if consumed == trimmed.len() => Some(value),
        _ => None,
    }
}

/// Reads `[sign] (Infinity | digits [. digits] [e [sign] digits])` from the
/// start of `text`, returning the value and the number of bytes consumed.
fn numeric_prefix(text: &str) -> Option<(f64, usize)> {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    if text[end..].starts_with("Infinity") {
        let value = if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some((value, end + "Infinity".len()));
    }

    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_digits = digits_from(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok().map(|value| (value, end))
}

/// Whole grades go out as JSON integers, non-finite ones as `null`.
fn serialize_grade<S>(grade: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let value = *grade;
    if !value.is_finite() {
        serializer.serialize_none()
    } else if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(value as i64)
    } else {
        serializer.serialize_f64(value)
    }
}
