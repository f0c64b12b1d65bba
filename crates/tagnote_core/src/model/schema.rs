//! Tag schema (controlled vocabulary) model.
//!
//! # Responsibility
//! - Define the four fixed tag dimensions and their wire names.
//! - Hold the allowed values for each dimension as runtime data.
//!
//! # Invariants
//! - Values are unique within one dimension and keep insertion order.
//! - A dimension never loses values; it only grows through `extend`.
//! - Membership is an exact, case-sensitive string comparison.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One of the four fixed tag dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Category,
    Type,
    Priority,
    Topics,
}

impl Dimension {
    /// All dimensions in canonical document order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Category,
        Dimension::Type,
        Dimension::Priority,
        Dimension::Topics,
    ];

    /// Wire name used in the document and tool arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Type => "type",
            Self::Priority => "priority",
            Self::Topics => "topics",
        }
    }

    /// Parses a wire name. Anything outside the fixed set is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "category" => Some(Self::Category),
            "type" => Some(Self::Type),
            "priority" => Some(Self::Priority),
            "topics" => Some(Self::Topics),
            _ => None,
        }
    }

    /// Comma-separated list of valid dimension names, for error messages.
    pub fn expected_names() -> String {
        Self::ALL
            .iter()
            .map(|dimension| dimension.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Allowed tag values per dimension.
///
/// Serialized as an object with exactly the four dimension keys. A key that
/// is missing from a loaded document is treated as an empty vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSchema {
    #[serde(default)]
    pub category: Vec<String>,
    /// Serialized as `type` to match the document layout.
    #[serde(rename = "type", default)]
    pub kind: Vec<String>,
    #[serde(default)]
    pub priority: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl TagSchema {
    /// Vocabulary written to a freshly created document.
    pub fn default_vocabulary() -> Self {
        Self {
            category: to_owned_values(&["work", "personal", "learning"]),
            kind: to_owned_values(&["project", "idea", "reference", "todo", "note"]),
            priority: to_owned_values(&[
                "active",
                "soon",
                "someday",
                "eventually",
                "maybe",
                "not-actionable",
            ]),
            topics: to_owned_values(&["mcp", "ai", "coding", "design"]),
        }
    }

    /// Allowed values for one dimension, in insertion order.
    pub fn values(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Category => &self.category,
            Dimension::Type => &self.kind,
            Dimension::Priority => &self.priority,
            Dimension::Topics => &self.topics,
        }
    }

    fn values_mut(&mut self, dimension: Dimension) -> &mut Vec<String> {
        match dimension {
            Dimension::Category => &mut self.category,
            Dimension::Type => &mut self.kind,
            Dimension::Priority => &mut self.priority,
            Dimension::Topics => &mut self.topics,
        }
    }

    /// Returns whether `value` is allowed for `dimension`.
    pub fn contains(&self, dimension: Dimension, value: &str) -> bool {
        self.values(dimension).iter().any(|allowed| allowed == value)
    }

    /// Appends every value not already present and returns the ones added.
    ///
    /// Duplicates inside `values` are collapsed as well, so the result never
    /// contains the same value twice.
    pub fn extend<I, S>(&mut self, dimension: Dimension, values: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let target = self.values_mut(dimension);
        let mut added = Vec::new();
        for value in values {
            let value = value.as_ref();
            if target.iter().any(|existing| existing == value) {
                continue;
            }
            target.push(value.to_string());
            added.push(value.to_string());
        }
        added
    }
}

impl Default for TagSchema {
    fn default() -> Self {
        Self::default_vocabulary()
    }
}

fn to_owned_values(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
