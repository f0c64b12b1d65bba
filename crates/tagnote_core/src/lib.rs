//! Core domain logic for tagnote.
//! This crate is the single source of truth for note, schema and query
//! invariants.

pub mod api;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use api::{call_tool, tool_descriptors, tool_names, ToolDescriptor, ToolError};
pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{Document, DocumentRef};
pub use model::note::{NewNote, Note, NoteId, NotePatch, NoteTags, NoteValidationError};
pub use model::schema::{Dimension, TagSchema};
pub use repo::note_repo::{NoteRepository, TagUsage};
pub use repo::schema_repo::SchemaStore;
pub use repo::{RepoError, RepoResult};
pub use search::filter::{find, parse_time_bound, NoteFilter};
pub use service::note_service::{NoteService, NoteServiceError, ServiceResult};
pub use store::{DocumentStore, JsonFileStore, MemoryStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
