//! Persisted document aggregate: `{tag_schema, notes}`.

use crate::model::note::Note;
use crate::model::schema::TagSchema;
use serde::{Deserialize, Serialize};

/// Aggregate root and unit of persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub tag_schema: TagSchema,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Document {
    /// Empty document seeded with the default vocabulary.
    pub fn with_default_schema() -> Self {
        Self {
            tag_schema: TagSchema::default_vocabulary(),
            notes: Vec::new(),
        }
    }

    /// Borrowed view used for saving without cloning the note list.
    pub fn view(&self) -> DocumentRef<'_> {
        DocumentRef {
            tag_schema: &self.tag_schema,
            notes: &self.notes,
        }
    }
}

/// Borrowed form of `Document`. Serializes to the same layout.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DocumentRef<'a> {
    pub tag_schema: &'a TagSchema,
    pub notes: &'a [Note],
}
