//! User-supplied override tables consulted by the message formatter.

use crate::catalog::MessageTemplate;
use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// `"field.rule"` or `"rule"` to a message template.
pub type CustomMessages = IndexMap<String, MessageTemplate>;

/// Field key to display name (`"first_name"` to `"First Name"`).
pub type CustomNames = IndexMap<String, String>;

/// Field key to (raw value to display value).
pub type CustomValues = IndexMap<String, IndexMap<String, String>>;

/// All three override tables, loadable from one JSON document:
///
/// ```json
/// {
///   "messages": { "name.required": ":Attr is required." },
///   "names": { "dob": "date of birth" },
///   "values": { "color": { "1": "Red" } }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overrides {
    pub messages: CustomMessages,
    pub names: CustomNames,
    pub values: CustomValues,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn message(mut self, key: impl Into<String>, template: impl Into<MessageTemplate>) -> Self {
        self.messages.insert(key.into(), template.into());
        self
    }

    pub fn name(mut self, field: impl Into<String>, display: impl Into<String>) -> Self {
        self.names.insert(field.into(), display.into());
        self
    }

    pub fn value(
        mut self,
        field: impl Into<String>,
        raw: impl Into<String>,
        display: impl Into<String>,
    ) -> Self {
        self.values
            .entry(field.into())
            .or_default()
            .insert(raw.into(), display.into());
        self
    }
}
