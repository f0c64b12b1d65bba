//! Repository layer over the in-memory document.
//!
//! # Responsibility
//! - Own the tag vocabulary (`SchemaStore`) and the note sequence
//!   (`NoteRepository`).
//! - Validate every write before mutating state.
//!
//! # Invariants
//! - Repositories never touch durable storage; flushing is the service's job.
//! - A failed validation leaves state byte-identical to before the call.

use crate::model::note::{NoteId, NoteValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod note_repo;
pub mod schema_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for schema and note operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(NoteValidationError),
    NotFound(NoteId),
    /// Schema operation addressed a dimension outside the fixed set.
    InvalidDimension(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note with id '{id}' not found"),
            Self::InvalidDimension(name) => write!(
                f,
                "invalid dimension '{name}'. Must be one of: {}",
                crate::model::schema::Dimension::expected_names()
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::InvalidDimension(_) => None,
        }
    }
}

impl From<NoteValidationError> for RepoError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}
