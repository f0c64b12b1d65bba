//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its structured tags.
//! - Define write-side inputs (`NewNote`, `NotePatch`) and their
//!   schema-independent validation.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `title` and `content` are never blank.
//! - `updated >= created`.

use crate::model::schema::Dimension;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a note.
pub type NoteId = Uuid;

/// Structured tags attached to every note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteTags {
    pub category: String,
    /// Serialized as `type` to match the document layout.
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: String,
    /// Ordered for storage, matched as a set.
    #[serde(default)]
    pub topics: Vec<String>,
}

impl NoteTags {
    /// Single-valued tag for `dimension`, or `None` for `topics`.
    pub fn single(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Category => Some(self.category.as_str()),
            Dimension::Type => Some(self.kind.as_str()),
            Dimension::Priority => Some(self.priority.as_str()),
            Dimension::Topics => None,
        }
    }

    /// Returns whether any topic of this note appears in `wanted`.
    pub fn has_any_topic(&self, wanted: &[String]) -> bool {
        self.topics.iter().any(|topic| wanted.contains(topic))
    }
}

/// Canonical persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    /// Markdown body, opaque to core.
    pub content: String,
    pub tags: NoteTags,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Input for creating a note.
///
/// Tag fields are optional here so that a missing field can be reported as a
/// validation failure instead of a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNote {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub kind: Option<String>,
    pub priority: Option<String>,
    pub topics: Option<Vec<String>>,
}

impl NewNote {
    /// Builds a complete create request.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
        kind: impl Into<String>,
        priority: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            category: Some(category.into()),
            kind: Some(kind.into()),
            priority: Some(priority.into()),
            topics: None,
        }
    }

    /// Sets the optional topic list.
    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = Some(topics.into_iter().map(Into::into).collect());
        self
    }

    /// Checks presence and non-emptiness of required fields and splits the
    /// draft into `(title, content, tags)`.
    ///
    /// Schema membership is checked separately by the repository.
    pub fn into_parts(self) -> Result<(String, String, NoteTags), NoteValidationError> {
        let title = self.title.ok_or(NoteValidationError::MissingField("title"))?;
        if title.is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        let content = self
            .content
            .ok_or(NoteValidationError::MissingField("content"))?;
        if content.is_empty() {
            return Err(NoteValidationError::EmptyContent);
        }
        let tags = NoteTags {
            category: self
                .category
                .ok_or(NoteValidationError::MissingField("category"))?,
            kind: self.kind.ok_or(NoteValidationError::MissingField("type"))?,
            priority: self
                .priority
                .ok_or(NoteValidationError::MissingField("priority"))?,
            topics: dedup_topics(self.topics.unwrap_or_default()),
        };
        Ok((title, content, tags))
    }
}

/// Partial update input. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub kind: Option<String>,
    pub priority: Option<String>,
    /// Replaces the whole topic list when set.
    pub topics: Option<Vec<String>>,
}

impl NotePatch {
    /// Rejects empty replacement title/content.
    pub fn validate_shape(&self) -> Result<(), NoteValidationError> {
        if matches!(self.title.as_deref(), Some(title) if title.is_empty()) {
            return Err(NoteValidationError::EmptyTitle);
        }
        if matches!(self.content.as_deref(), Some(content) if content.is_empty()) {
            return Err(NoteValidationError::EmptyContent);
        }
        Ok(())
    }
}

/// Collapses repeated topics, keeping the first occurrence order.
pub fn dedup_topics(topics: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(topics.len());
    for topic in topics {
        if !unique.contains(&topic) {
            unique.push(topic);
        }
    }
    unique
}

/// Validation failures for note writes, schema edits and query arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyTitle,
    EmptyContent,
    /// Required input field was not supplied.
    MissingField(&'static str),
    /// Tag value is not part of the dimension's vocabulary.
    UnknownTag {
        dimension: Dimension,
        value: String,
        allowed: Vec<String>,
    },
    /// Date filter that is not an ISO-8601 timestamp or date.
    InvalidTimestamp { field: &'static str, value: String },
    /// Tool arguments that could not be decoded.
    InvalidArguments(String),
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title cannot be empty"),
            Self::EmptyContent => write!(f, "content cannot be empty"),
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::UnknownTag {
                dimension,
                value,
                allowed,
            } => write!(
                f,
                "invalid {dimension} '{value}'. Must be one of: {}",
                allowed.join(", ")
            ),
            Self::InvalidTimestamp { field, value } => write!(
                f,
                "invalid `{field}` value `{value}`; expected an ISO-8601 timestamp or date"
            ),
            Self::InvalidArguments(message) => write!(f, "invalid arguments: {message}"),
        }
    }
}

impl Error for NoteValidationError {}
