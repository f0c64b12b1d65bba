//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate schema store, note repository and query engine calls into
//!   use-case level APIs.
//! - Keep tool-call and CLI layers decoupled from storage details.

pub mod note_service;
