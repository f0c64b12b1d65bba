//! In-process document store.
//!
//! Keeps the encoded JSON text in memory so documents go through the same
//! codec as the file store.

use super::{decode_document, encode_document, DocumentStore, StoreResult};
use crate::model::document::{Document, DocumentRef};
use log::debug;

/// Document store holding the encoded document in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: Option<String>,
    saves: usize,
}

impl MemoryStore {
    /// Empty store; the first `load` creates the default document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw document text.
    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
            saves: 0,
        }
    }

    /// Last saved (or seeded) JSON text.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl DocumentStore for MemoryStore {
    fn load(&mut self) -> StoreResult<Document> {
        match self.contents.as_deref() {
            Some(text) => decode_document(text, "memory"),
            None => {
                let document = Document::with_default_schema();
                self.save(document.view())?;
                Ok(document)
            }
        }
    }

    fn save(&mut self, document: DocumentRef<'_>) -> StoreResult<()> {
        let text = encode_document(document)?;
        self.contents = Some(text);
        self.saves += 1;
        debug!(
            "event=doc_save module=store status=ok mode=memory notes={}",
            document.notes.len()
        );
        Ok(())
    }
}
