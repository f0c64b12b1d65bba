//! JSON file document store with atomic replace.
//!
//! # Invariants
//! - Saves go to a temp file in the target directory, are fsynced, then
//!   renamed over the target. Readers see the old or the new file, never a
//!   torn one.
//! - A failed save removes its temp file and leaves the target untouched.

use super::{decode_document, encode_document, DocumentStore, StoreError, StoreResult};
use crate::model::document::{Document, DocumentRef};
use log::{error, info};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::Builder;

const TEMP_PREFIX: &str = ".notes_";
const TEMP_SUFFIX: &str = ".json.tmp";

/// Document store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_atomic(&self, text: &str) -> StoreResult<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut temp = Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(&dir)
            .map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?;
        temp.write_all(text.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|source| StoreError::Io {
                path: temp.path().to_path_buf(),
                source,
            })?;

        // Dropping the temp file on any error above deletes it.
        temp.persist(&self.path)
            .map_err(|err| self.io_error(err.error))?;
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&mut self) -> StoreResult<Document> {
        let started_at = Instant::now();
        info!("event=doc_load module=store status=start mode=file");

        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let document = Document::with_default_schema();
                self.save(document.view())?;
                info!(
                    "event=doc_load module=store status=ok mode=file created_default=true duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Ok(document);
            }
            Err(err) => {
                error!(
                    "event=doc_load module=store status=error mode=file duration_ms={} error_code=read_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(self.io_error(err));
            }
        };

        match decode_document(&text, &format!("`{}`", self.path.display())) {
            Ok(document) => {
                info!(
                    "event=doc_load module=store status=ok mode=file notes={} duration_ms={}",
                    document.notes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(document)
            }
            Err(err) => {
                error!(
                    "event=doc_load module=store status=error mode=file duration_ms={} error_code=decode_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn save(&mut self, document: DocumentRef<'_>) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = encode_document(document).and_then(|text| self.write_atomic(&text));
        match &result {
            Ok(()) => info!(
                "event=doc_save module=store status=ok mode=file notes={} duration_ms={}",
                document.notes.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=doc_save module=store status=error mode=file duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}
