//! Schema store: controlled vocabulary lookups and growth.
//!
//! # Responsibility
//! - Answer membership questions for note validation.
//! - Extend a dimension with new values.
//!
//! # Invariants
//! - Unknown dimension names are never valid and cannot be extended.
//! - `extend` appends only; existing values are never removed or reordered.

use crate::model::note::NoteValidationError;
use crate::model::schema::{Dimension, TagSchema};
use crate::repo::{RepoError, RepoResult};

/// Owner of the in-memory tag schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaStore {
    schema: TagSchema,
}

impl SchemaStore {
    pub fn new(schema: TagSchema) -> Self {
        Self { schema }
    }

    /// Current schema. No side effects.
    pub fn schema(&self) -> &TagSchema {
        &self.schema
    }

    /// Returns whether `value` is allowed for the dimension named `dimension`.
    pub fn validate(&self, dimension: &str, value: &str) -> bool {
        Dimension::parse(dimension)
            .map(|dimension| self.schema.contains(dimension, value))
            .unwrap_or(false)
    }

    /// Same membership check as `validate`, shaped as a validation error.
    pub fn require(&self, dimension: Dimension, value: &str) -> Result<(), NoteValidationError> {
        if self.schema.contains(dimension, value) {
            return Ok(());
        }
        Err(NoteValidationError::UnknownTag {
            dimension,
            value: value.to_string(),
            allowed: self.schema.values(dimension).to_vec(),
        })
    }

    /// Checks every topic, failing on the first one outside the schema.
    pub fn require_topics(&self, topics: &[String]) -> Result<(), NoteValidationError> {
        topics
            .iter()
            .try_for_each(|topic| self.require(Dimension::Topics, topic))
    }

    /// Appends new values to a dimension and returns the ones actually added.
    ///
    /// # Errors
    /// - `InvalidDimension` when `dimension` is not one of the fixed names.
    pub fn extend(&mut self, dimension: &str, values: &[String]) -> RepoResult<Vec<String>> {
        let parsed = Dimension::parse(dimension)
            .ok_or_else(|| RepoError::InvalidDimension(dimension.to_string()))?;
        Ok(self.schema.extend(parsed, values))
    }
}
