//! Error types: configuration errors and the validation error map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A broken validation setup.
///
/// These are programmer mistakes, never bad user data: an unknown rule
/// name, a parameterized rule given too few parameters, a pattern that does
/// not compile. They are returned from `passes()`/`fails()` instead of being
/// recorded as field failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("\"{0}\" validation rule does not exist")]
    UnknownRule(String),

    #[error("validation rule {rule} requires at least {expected} parameters, {given} given")]
    MissingParameters {
        rule: String,
        expected: usize,
        given: usize,
    },

    #[error("invalid regex pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("validation rule {0} is not supported")]
    UnsupportedRule(String),

    #[error("malformed catalog or override table: {0}")]
    Catalog(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Formatted validation failures keyed by field.
///
/// Fields keep the order in which they first failed, and each field's
/// messages keep the order of its rules. A field without failures has no
/// entry. Serializes as a plain JSON object:
///
/// ```json
/// { "name": ["The name field is required."] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: IndexMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Create an empty validation errors collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message for a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Check if there are any errors.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the total number of messages.
    pub fn len(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    /// Get the messages for a specific field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Check whether a field has at least one message.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Field names with errors, in failure order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Iterate over `(field, messages)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Convert to Result - Ok if no errors, Err otherwise.
    pub fn into_result(self) -> std::result::Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub(crate) fn clear(&mut self) {
        self.fields.clear();
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: {} error(s)", self.len())
    }
}

impl std::error::Error for ValidationErrors {}
