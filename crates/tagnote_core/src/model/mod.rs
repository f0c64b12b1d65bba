//! Domain model for tagged notes.
//!
//! # Responsibility
//! - Define the note record, the tag schema and the persisted document.
//! - Keep schema-independent validation next to the types it guards.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Tag vocabularies are runtime data, never compile-time enums.

pub mod document;
pub mod note;
pub mod schema;
