//! Note use-case service.
//!
//! # Responsibility
//! - Own the in-memory document for the process lifetime.
//! - Run every operation as validate -> mutate -> flush.
//! - Map repository/store failures onto the four caller-facing error kinds.
//!
//! # Invariants
//! - Read-only operations never flush.
//! - A mutation is reported as committed only after a successful save.
//! - A failed save keeps the in-memory mutation and reports `io_error`.

use crate::model::document::DocumentRef;
use crate::model::note::{NewNote, Note, NoteId, NotePatch, NoteValidationError};
use crate::model::schema::{Dimension, TagSchema};
use crate::repo::note_repo::{NoteRepository, TagUsage};
use crate::repo::schema_repo::SchemaStore;
use crate::repo::RepoError;
use crate::search::filter::{find, NoteFilter};
use crate::store::{DocumentStore, StoreError};
use chrono::Utc;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, NoteServiceError>;

/// Service error for note and schema use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Missing field, blank text or tag value outside the schema.
    Validation(NoteValidationError),
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Schema extension addressed an unknown dimension.
    InvalidDimension(String),
    /// Durable read/write failure.
    Store(StoreError),
}

impl NoteServiceError {
    /// Stable error kind reported to tool callers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NoteNotFound(_) => "not_found",
            Self::InvalidDimension(_) => "invalid_dimension",
            Self::Store(_) => "io_error",
        }
    }
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NoteNotFound(id) => write!(f, "note with id '{id}' not found"),
            Self::InvalidDimension(name) => write!(
                f,
                "invalid dimension '{name}'. Must be one of: {}",
                Dimension::expected_names()
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NoteNotFound(_) | Self::InvalidDimension(_) => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            RepoError::InvalidDimension(name) => Self::InvalidDimension(name),
        }
    }
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Note service facade over one document store.
pub struct NoteService<S: DocumentStore> {
    store: S,
    schema: SchemaStore,
    notes: NoteRepository,
}

impl<S: DocumentStore> NoteService<S> {
    /// Loads the document from `store` (creating the default one if absent).
    pub fn open(mut store: S) -> ServiceResult<Self> {
        let document = store.load()?;
        info!(
            "event=service_open module=service status=ok notes={}",
            document.notes.len()
        );
        Ok(Self {
            store,
            schema: SchemaStore::new(document.tag_schema),
            notes: NoteRepository::new(document.notes),
        })
    }

    /// Current tag schema.
    pub fn get_schema(&self) -> &TagSchema {
        self.schema.schema()
    }

    /// Returns whether `value` is allowed for the dimension named `dimension`.
    pub fn validate_tag(&self, dimension: &str, value: &str) -> bool {
        self.schema.validate(dimension, value)
    }

    /// Adds values to a schema dimension and returns the updated schema.
    ///
    /// Flushes only when at least one value was new.
    pub fn add_tags_to_schema(
        &mut self,
        dimension: &str,
        values: &[String],
    ) -> ServiceResult<TagSchema> {
        let added = self.schema.extend(dimension, values)?;
        if added.is_empty() {
            debug!("event=schema_extend module=service status=noop dimension={dimension}");
        } else {
            self.flush("schema_extend")?;
            info!(
                "event=schema_extend module=service status=ok dimension={dimension} added={}",
                added.len()
            );
        }
        Ok(self.schema.schema().clone())
    }

    /// Creates one note after schema validation.
    pub fn create_note(&mut self, draft: NewNote) -> ServiceResult<Note> {
        let note = self.notes.create(&self.schema, draft, Utc::now())?;
        self.flush("note_create")?;
        info!(
            "event=note_create module=service status=ok note_id={}",
            note.id
        );
        Ok(note)
    }

    /// Gets one note by stable id.
    pub fn read_note(&self, id: NoteId) -> ServiceResult<Note> {
        Ok(self.notes.get(id)?.clone())
    }

    /// Applies a partial update; omitted fields keep their values.
    pub fn update_note(&mut self, id: NoteId, patch: NotePatch) -> ServiceResult<Note> {
        let note = self.notes.update(&self.schema, id, patch, Utc::now())?;
        self.flush("note_update")?;
        info!(
            "event=note_update module=service status=ok note_id={}",
            note.id
        );
        Ok(note)
    }

    /// Deletes one note by stable id.
    pub fn delete_note(&mut self, id: NoteId) -> ServiceResult<()> {
        self.notes.delete(id)?;
        self.flush("note_delete")?;
        info!("event=note_delete module=service status=ok note_id={id}");
        Ok(())
    }

    /// All notes in storage order.
    pub fn list_notes(&self) -> &[Note] {
        self.notes.list_all()
    }

    /// Notes matching `filter`, in storage order.
    pub fn find_notes(&self, filter: &NoteFilter) -> Vec<Note> {
        let hits: Vec<Note> = find(self.notes.list_all(), filter)
            .into_iter()
            .cloned()
            .collect();
        debug!(
            "event=note_find module=service status=ok hits={} total={}",
            hits.len(),
            self.notes.list_all().len()
        );
        hits
    }

    /// Tag usage counts across all notes.
    pub fn list_tags(&self) -> TagUsage {
        self.notes.tag_usage()
    }

    /// Backing store, for inspection by embedders and tests.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn flush(&mut self, event: &str) -> ServiceResult<()> {
        let document = DocumentRef {
            tag_schema: self.schema.schema(),
            notes: self.notes.list_all(),
        };
        if let Err(err) = self.store.save(document) {
            error!("event={event} module=service status=error error_code=flush_failed error={err}");
            warn!("event={event} module=service status=unpersisted in_memory_changed=true");
            return Err(err.into());
        }
        Ok(())
    }
}
