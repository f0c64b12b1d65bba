//! Persistence gateway for the `{tag_schema, notes}` document.
//!
//! # Responsibility
//! - Load the document, creating and persisting a default one when absent.
//! - Save the full document in one atomic step.
//!
//! # Invariants
//! - Every save rewrites the whole document; there are no partial writes.
//! - This is the only layer that touches durable storage.

use crate::model::document::{Document, DocumentRef};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage backend for the whole document.
pub trait DocumentStore {
    /// Reads the document. An absent document is created with the default
    /// schema and saved before returning.
    fn load(&mut self) -> StoreResult<Document>;
    /// Replaces the stored document atomically.
    fn save(&mut self, document: DocumentRef<'_>) -> StoreResult<()>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &mut S {
    fn load(&mut self) -> StoreResult<Document> {
        (**self).load()
    }

    fn save(&mut self, document: DocumentRef<'_>) -> StoreResult<()> {
        (**self).save(document)
    }
}

/// Storage error for document load/save.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode(serde_json::Error),
    Decode {
        origin: String,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::Encode(err) => write!(f, "failed to encode notes document: {err}"),
            Self::Decode { origin, source } => {
                write!(f, "failed to decode notes document from {origin}: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
        }
    }
}

/// Serializes a document as 2-space indented UTF-8 JSON.
pub fn encode_document(document: DocumentRef<'_>) -> StoreResult<String> {
    let mut text = serde_json::to_string_pretty(&document).map_err(StoreError::Encode)?;
    text.push('\n');
    Ok(text)
}

/// Parses a document; `origin` names the source in error messages.
pub fn decode_document(text: &str, origin: &str) -> StoreResult<Document> {
    serde_json::from_str(text).map_err(|source| StoreError::Decode {
        origin: origin.to_string(),
        source,
    })
}
