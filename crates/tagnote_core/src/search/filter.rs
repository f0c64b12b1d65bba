//! Tag, title and date filtering over notes.
//!
//! # Responsibility
//! - Hold the optional filter fields of a note search.
//! - Decide whether a single note matches.
//!
//! # Invariants
//! - Supplied fields combine with AND; `topics` values combine with OR.
//! - Date bounds are strict: `after` means `>`, `before` means `<`.
//! - Filter values are never checked against the schema.
//! - Matching never mutates notes and never reorders them.

use crate::model::note::{Note, NoteValidationError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Search filter. Every field is optional; `Default` matches all notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub category: Option<String>,
    pub kind: Option<String>,
    pub priority: Option<String>,
    /// Matches notes sharing at least one topic. An empty list matches nothing.
    pub topics: Option<Vec<String>>,
    /// Case-insensitive substring of the title.
    pub title_contains: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub updated_after: Option<DateTime<Utc>>,
    pub updated_before: Option<DateTime<Utc>>,
}

impl NoteFilter {
    /// Returns whether no constraint is set.
    pub fn is_unconstrained(&self) -> bool {
        self == &Self::default()
    }

    /// Returns whether `note` satisfies every supplied field.
    pub fn matches(&self, note: &Note) -> bool {
        if !eq_if_set(self.category.as_deref(), &note.tags.category) {
            return false;
        }
        if !eq_if_set(self.kind.as_deref(), &note.tags.kind) {
            return false;
        }
        if !eq_if_set(self.priority.as_deref(), &note.tags.priority) {
            return false;
        }

        if let Some(topics) = self.topics.as_deref() {
            if !note.tags.has_any_topic(topics) {
                return false;
            }
        }

        if let Some(needle) = self.title_contains.as_deref() {
            if !note.title.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }

        within(note.created, self.created_after, self.created_before)
            && within(note.updated, self.updated_after, self.updated_before)
    }
}

/// Returns matching notes in storage order.
pub fn find<'a>(notes: &'a [Note], filter: &NoteFilter) -> Vec<&'a Note> {
    notes.iter().filter(|note| filter.matches(note)).collect()
}

/// Parses a date filter bound.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS[.f]` (read as UTC)
/// and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_time_bound(
    field: &'static str,
    value: &str,
) -> Result<DateTime<Utc>, NoteValidationError> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }
    Err(NoteValidationError::InvalidTimestamp {
        field,
        value: value.to_string(),
    })
}

fn eq_if_set(expected: Option<&str>, actual: &str) -> bool {
    expected.map_or(true, |expected| expected == actual)
}

fn within(
    value: DateTime<Utc>,
    after: Option<DateTime<Utc>>,
    before: Option<DateTime<Utc>>,
) -> bool {
    after.map_or(true, |bound| value > bound) && before.map_or(true, |bound| value < bound)
}
