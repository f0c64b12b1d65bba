//! Note repository over the in-memory note sequence.
//!
//! # Responsibility
//! - Provide create/get/update/delete/list over notes in storage order.
//! - Validate tag values against the schema store before any write.
//! - Aggregate tag usage counts.
//!
//! # Invariants
//! - Notes keep insertion order; updates happen in place.
//! - `update` is all-or-nothing: every provided field is validated first.
//! - `created` never changes and `updated` never moves backwards.

use crate::model::note::{dedup_topics, NewNote, Note, NoteId, NotePatch};
use crate::model::schema::Dimension;
use crate::repo::schema_repo::SchemaStore;
use crate::repo::{RepoError, RepoResult};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Per-dimension usage counts, keyed by tag value.
///
/// All four dimensions are always present; values with zero uses are not.
pub type TagUsage = BTreeMap<Dimension, BTreeMap<String, usize>>;

/// Owner of the in-memory note sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteRepository {
    notes: Vec<Note>,
}

impl NoteRepository {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// Validates and appends a new note stamped with `now`.
    pub fn create(
        &mut self,
        schema: &SchemaStore,
        draft: NewNote,
        now: DateTime<Utc>,
    ) -> RepoResult<Note> {
        let (title, content, tags) = draft.into_parts()?;
        schema.require(Dimension::Category, &tags.category)?;
        schema.require(Dimension::Type, &tags.kind)?;
        schema.require(Dimension::Priority, &tags.priority)?;
        schema.require_topics(&tags.topics)?;

        let note = Note {
            id: self.fresh_id(),
            title,
            content,
            tags,
            created: now,
            updated: now,
        };
        self.notes.push(note.clone());
        Ok(note)
    }

    /// Gets one note by id.
    pub fn get(&self, id: NoteId) -> RepoResult<&Note> {
        self.notes
            .iter()
            .find(|note| note.id == id)
            .ok_or(RepoError::NotFound(id))
    }

    /// Applies a partial update after validating every provided field.
    pub fn update(
        &mut self,
        schema: &SchemaStore,
        id: NoteId,
        patch: NotePatch,
        now: DateTime<Utc>,
    ) -> RepoResult<Note> {
        let index = self.position(id)?;

        patch.validate_shape()?;
        if let Some(category) = patch.category.as_deref() {
            schema.require(Dimension::Category, category)?;
        }
        if let Some(kind) = patch.kind.as_deref() {
            schema.require(Dimension::Type, kind)?;
        }
        if let Some(priority) = patch.priority.as_deref() {
            schema.require(Dimension::Priority, priority)?;
        }
        let topics = patch.topics.map(dedup_topics);
        if let Some(topics) = topics.as_deref() {
            schema.require_topics(topics)?;
        }

        let note = &mut self.notes[index];
        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(content) = patch.content {
            note.content = content;
        }
        if let Some(category) = patch.category {
            note.tags.category = category;
        }
        if let Some(kind) = patch.kind {
            note.tags.kind = kind;
        }
        if let Some(priority) = patch.priority {
            note.tags.priority = priority;
        }
        if let Some(topics) = topics {
            note.tags.topics = topics;
        }
        // Clock can step backwards; keep `updated` monotonic.
        note.updated = now.max(note.updated);

        Ok(note.clone())
    }

    /// Removes a note and returns it.
    pub fn delete(&mut self, id: NoteId) -> RepoResult<Note> {
        let index = self.position(id)?;
        Ok(self.notes.remove(index))
    }

    /// All notes in storage order.
    pub fn list_all(&self) -> &[Note] {
        &self.notes
    }

    /// Counts tag values in use; each topic occurrence counts once.
    pub fn tag_usage(&self) -> TagUsage {
        let mut usage: TagUsage = Dimension::ALL
            .into_iter()
            .map(|dimension| (dimension, BTreeMap::new()))
            .collect();

        for note in &self.notes {
            for dimension in [Dimension::Category, Dimension::Type, Dimension::Priority] {
                if let Some(value) = note.tags.single(dimension) {
                    bump(&mut usage, dimension, value);
                }
            }
            for topic in &note.tags.topics {
                bump(&mut usage, Dimension::Topics, topic);
            }
        }

        usage
    }

    fn position(&self, id: NoteId) -> RepoResult<usize> {
        self.notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(RepoError::NotFound(id))
    }

    fn fresh_id(&self) -> NoteId {
        loop {
            let candidate = Uuid::new_v4();
            if !self.notes.iter().any(|note| note.id == candidate) {
                return candidate;
            }
        }
    }
}

fn bump(usage: &mut TagUsage, dimension: Dimension, value: &str) {
    *usage
        .entry(dimension)
        .or_default()
        .entry(value.to_string())
        .or_insert(0) += 1;
}
