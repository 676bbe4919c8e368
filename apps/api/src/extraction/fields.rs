//! Line heuristics that pull contact fields out of raw resume text.
//!
//! One forward pass over the lines. Every rule is independent and
//! first-match-wins: once a field holds a value no later line can replace it,
//! and a single line may feed several fields at once.
//!
//! The rules are loose: any short line with a dash and a digit counts as a
//! phone number.

use crate::models::ContactRecord;

/// Only lines with index below this are considered for the name.
const NAME_SCAN_LINES: usize = 5;
/// Name candidates must be longer than this many characters...
const NAME_MIN_EXCLUSIVE: usize = 2;
/// ...and shorter than this many.
const NAME_MAX_EXCLUSIVE: usize = 100;
/// Phone candidates must be shorter than this many characters.
const PHONE_MAX_EXCLUSIVE: usize = 20;

/// Splits `text` on newlines and runs [`extract_contact_fields`].
pub fn extract_from_text(text: &str) -> ContactRecord {
    let lines: Vec<&str> = text.split('\n').collect();
    extract_contact_fields(&lines)
}

/// Builds a [`ContactRecord`] from an ordered sequence of lines.
///
/// Never fails. Garbled or empty input degrades to empty fields.
pub fn extract_contact_fields<S: AsRef<str>>(lines: &[S]) -> ContactRecord {
    let mut record = ContactRecord::default();

    for (index, raw) in lines.iter().enumerate() {
        let line = raw.as_ref().trim();
        let lower = line.to_lowercase();

        if record.email.is_empty() && is_email_line(line, &lower) {
            record.email = email_token(line).to_string();
        }

        if record.phone.is_empty() && is_phone_line(line) {
            record.phone = line.to_string();
        }

        if record.linkedin.is_empty() && lower.contains("linkedin") {
            record.linkedin = line.to_string();
        }

        if record.github.is_empty() && lower.contains("github") {
            record.github = line.to_string();
        }

        if record.portfolio.is_empty() && (lower.contains("portfolio") || lower.contains("website"))
        {
            record.portfolio = line.to_string();
        }

        if record.name.is_empty() && index < NAME_SCAN_LINES && is_name_line(line) {
            record.name = line.to_string();
        }
    }

    record
}

fn is_email_line(line: &str, lower: &str) -> bool {
    line.contains('@') && (line.contains('.') || lower.contains("gmail") || lower.contains("yahoo"))
}

/// First whitespace-delimited token, or the whole line when it has none.
fn email_token(line: &str) -> &str {
    line.split_whitespace().next().unwrap_or(line)
}

fn is_phone_line(line: &str) -> bool {
    (line.contains('+') || line.contains('-'))
        && has_digit(line)
        && line.chars().count() < PHONE_MAX_EXCLUSIVE
}

fn is_name_line(line: &str) -> bool {
    let len = line.chars().count();
    len > NAME_MIN_EXCLUSIVE
        && len < NAME_MAX_EXCLUSIVE
        && !has_digit(line)
        && !line.contains('@')
        && !line.contains('+')
}

/// Any Unicode digit counts, including other scripts and superscripts.
fn has_digit(line: &str) -> bool {
    line.chars().any(char::is_numeric)
}
