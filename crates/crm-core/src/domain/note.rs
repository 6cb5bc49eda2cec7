//! Timestamped Notes
//!
//! Owners and leads keep notes as one free-text column. New notes are
//! appended below the existing text with a local timestamp prefix.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

/// `existing` followed by a blank line and `"<dd/mm/yyyy HH:MM>: <note>"`.
/// Returns `None` for a blank note.
pub fn append_note<Tz>(existing: Option<&str>, note: &str, at: &DateTime<Tz>) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let note = note.trim();
    if note.is_empty() {
        return None;
    }
    let entry = format!("{}: {}", at.format("%d/%m/%Y %H:%M"), note);
    Some(match existing.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => format!("{text}\n\n{entry}"),
        None => entry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_append_note() {
        let at = Utc.with_ymd_and_hms(2025, 11, 10, 14, 30, 0).unwrap();
        assert_eq!(append_note(None, " Ligar amanhã ", &at).as_deref(), Some("10/11/2025 14:30: Ligar amanhã"));
        assert_eq!(
            append_note(Some("Prefere zona sul"), "Visitou o apto", &at).as_deref(),
            Some("Prefere zona sul\n\n10/11/2025 14:30: Visitou o apto")
        );
        assert_eq!(append_note(Some("x"), "   ", &at), None);
    }
}
