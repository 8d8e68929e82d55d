//! # ruleval
//!
//! Declarative validation of loosely-typed records. Each field gets a
//! pipe-delimited rule string, the record is checked against every rule and
//! failures come back as human-readable messages keyed by field.
//!
//! ## Example
//!
//! ```rust
//! use ruleval::prelude::*;
//! use serde_json::json;
//!
//! let mut validator = Validator::new(
//!     record(json!({ "name": "", "age": 15, "email": "rati@example.com" })),
//!     [
//!         ("name", "required|min:3"),
//!         ("age", "numeric|min:20"),
//!         ("email", "required|email"),
//!     ],
//! );
//!
//! assert!(validator.fails()?);
//! assert_eq!(validator.valid()?, ["email"]);
//! assert_eq!(validator.invalid()?, ["name", "age"]);
//! assert_eq!(validator.error("age").unwrap(), ["The age must be at least 20."]);
//! # Ok::<(), ruleval::ConfigError>(())
//! ```
//!
//! ## Rules
//!
//! - presence: `required`, `required_if`, `required_unless`,
//!   `required_with[_all]`, `required_without[_all]`, `present`, `filled`,
//!   `accepted`
//! - size: `size`, `between`, `min`, `max`, `digits`, `digits_between`
//! - format: `numeric`, `integer`, `email`, `url`, `alpha`, `alpha_num`,
//!   `alpha_dash`, `regex`, `ip`, `json`
//! - dates: `date`, `before`, `after`, `before_or_equal`,
//!   `after_or_equal`, `date_between`
//! - cross-field: `same`, `different`, `confirmed`, `in`, `not_in`
//! - types: `array`, `string`, `boolean`
//! - markers: `nullable`, `sometimes`, `bail`
//!
//! Anything else is looked up among the rules registered with
//! [`Validator::extend`].
//!
//! ## Error Format
//!
//! [`ValidationErrors`] serializes as a plain object:
//!
//! ```json
//! {
//!   "name": ["The name field is required.", "The name must be at least 3 characters."],
//!   "age": ["The age must be at least 20."]
//! }
//! ```

#[macro_use]
mod tracing_macros;

pub mod case;
pub mod catalog;
mod error;
pub mod formatter;
pub mod overrides;
pub mod parser;
pub mod predicates;
pub mod registry;
pub mod rule;
mod validator;
pub mod value;

pub use catalog::{DataType, MessageCatalog, MessageTemplate};
pub use error::{ConfigError, Result, ValidationErrors};
pub use overrides::Overrides;
pub use parser::{parse_rule_set, parse_rules, RuleSet, RuleSpec};
pub use rule::{Rule, RuleDescriptor};
pub use validator::{FailedRules, Validator};
pub use value::{record, Record, Value};

/// Prelude module for validation
pub mod prelude {
    pub use crate::catalog::MessageCatalog;
    pub use crate::error::{ConfigError, ValidationErrors};
    pub use crate::overrides::Overrides;
    pub use crate::rule::Rule;
    pub use crate::validator::Validator;
    pub use crate::value::{record, Record, Value};
}
