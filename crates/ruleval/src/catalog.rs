//! Message templates keyed by snake_case rule name.
//!
//! A catalog entry is either a single template or, for the size rules, a
//! table of templates keyed by the field's data type. Catalogs are
//! immutable once built and shared between sessions through [`Arc`].

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Data type of a field, as far as message selection is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Numeric,
    String,
    Array,
    /// Accepted in catalogs for compatibility; never selected.
    File,
}

/// A catalog or override entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageTemplate {
    Text(String),
    ByType(HashMap<DataType, String>),
}

impl MessageTemplate {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageTemplate::Text(text) => Some(text),
            MessageTemplate::ByType(_) => None,
        }
    }

    /// Pick the template for a data type. Plain text ignores the type.
    pub fn resolve(&self, data_type: DataType) -> Option<&str> {
        match self {
            MessageTemplate::Text(text) => Some(text),
            MessageTemplate::ByType(by_type) => by_type.get(&data_type).map(String::as_str),
        }
    }
}

impl From<&str> for MessageTemplate {
    fn from(text: &str) -> Self {
        MessageTemplate::Text(text.to_string())
    }
}

impl From<String> for MessageTemplate {
    fn from(text: String) -> Self {
        MessageTemplate::Text(text)
    }
}

/// Default messages, keyed by snake_case rule name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    entries: HashMap<String, MessageTemplate>,
}

const TEXT_MESSAGES: &[(&str, &str)] = &[
    ("accepted", "The :attr must be accepted."),
    ("after", "The :attr must be a date after :date."),
    ("after_or_equal", "The :attr must be a date after or equal to :date."),
    ("alpha", "The :attr may only contain letters."),
    ("alpha_dash", "The :attr may only contain letters, numbers, and dashes."),
    ("alpha_num", "The :attr may only contain letters and numbers."),
    ("array", "The :attr must be an array."),
    ("before", "The :attr must be a date before :date."),
    ("before_or_equal", "The :attr must be a date before or equal to :date."),
    ("boolean", "The :attr field must be true or false."),
    ("confirmed", "The :attr confirmation does not match."),
    ("date", "The :attr is not a valid date."),
    ("date_between", "The :attr must be between :start and :end."),
    ("different", "The :attr and :other must be different."),
    ("digits", "The :attr must be :digits digits."),
    ("digits_between", "The :attr must be between :min and :max digits."),
    ("email", "The :attr format is invalid."),
    ("exists", "The selected :attr is invalid."),
    ("filled", "The :attr field must have a value."),
    ("in", "The selected :attr is invalid."),
    ("integer", "The :attr must be an integer."),
    ("ip", "The :attr must be a valid IP address."),
    ("json", "The :attr must be a valid JSON string."),
    ("not_in", "The selected :attr is invalid."),
    ("numeric", "The :attr must be a number."),
    ("present", "The :attr field must be present."),
    ("regex", "The :attr format is invalid."),
    ("required", "The :attr field is required."),
    ("required_if", "The :attr field is required when :other is :value."),
    ("required_unless", "The :attr field is required unless :other is in :values."),
    ("required_with", "The :attr field is required when :values is present."),
    ("required_with_all", "The :attr field is required when :values is present."),
    ("required_without", "The :attr field is required when :values is not present."),
    ("required_without_all", "The :attr field is required when none of :values are present."),
    ("same", "The :attr and :other must match."),
    ("string", "The :attr must be a string."),
    ("unique", "The :attr has already been taken."),
    ("url", "The :attr format is invalid."),
];

// numeric, string, array, file
const SIZED_MESSAGES: &[(&str, [&str; 4])] = &[
    (
        "between",
        [
            "The :attr must be between :min and :max.",
            "The :attr must be between :min and :max characters.",
            "The :attr must have between :min and :max items.",
            "The :attr must be between :min and :max kilobytes.",
        ],
    ),
    (
        "max",
        [
            "The :attr may not be greater than :max.",
            "The :attr may not be greater than :max characters.",
            "The :attr may not have more than :max items.",
            "The :attr may not be greater than :max kilobytes.",
        ],
    ),
    (
        "min",
        [
            "The :attr must be at least :min.",
            "The :attr must be at least :min characters.",
            "The :attr must have at least :min items.",
            "The :attr must be at least :min kilobytes.",
        ],
    ),
    (
        "size",
        [
            "The :attr must be :size.",
            "The :attr must be :size characters.",
            "The :attr must contain :size items.",
            "The :attr must be :size kilobytes.",
        ],
    ),
];

static DEFAULT_CATALOG: OnceLock<Arc<MessageCatalog>> = OnceLock::new();

impl MessageCatalog {
    /// An empty catalog: every rule formats to an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in English catalog.
    pub fn english() -> Self {
        let mut entries: HashMap<String, MessageTemplate> = TEXT_MESSAGES
            .iter()
            .map(|(key, text)| (key.to_string(), MessageTemplate::from(*text)))
            .collect();

        for (key, [numeric, string, array, file]) in SIZED_MESSAGES {
            let by_type = HashMap::from([
                (DataType::Numeric, numeric.to_string()),
                (DataType::String, string.to_string()),
                (DataType::Array, array.to_string()),
                (DataType::File, file.to_string()),
            ]);
            entries.insert(key.to_string(), MessageTemplate::ByType(by_type));
        }

        Self { entries }
    }

    /// Process-wide English catalog, built on first use.
    pub fn shared_default() -> Arc<MessageCatalog> {
        DEFAULT_CATALOG
            .get_or_init(|| Arc::new(Self::english()))
            .clone()
    }

    /// Load a catalog from JSON: `{ "required": "...", "min": { "string": "..." } }`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add or replace an entry.
    pub fn with_entry(mut self, key: impl Into<String>, template: impl Into<MessageTemplate>) -> Self {
        self.entries.insert(key.into(), template.into());
        self
    }

    /// Merge another catalog over this one.
    pub fn merge(mut self, other: MessageCatalog) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn get(&self, key: &str) -> Option<&MessageTemplate> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
