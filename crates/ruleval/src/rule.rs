//! Rule identifiers and parsed rule descriptors.

use crate::case::{pascal_case, snake_case};
use serde::{Serialize, Serializer};
use std::fmt;

macro_rules! builtin_rules {
    ($($variant:ident),* $(,)?) => {
        /// A rule identifier: one of the built-ins, or a user rule by its
        /// PascalCase name.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum Rule {
            $($variant,)*
            Custom(String),
        }

        impl Rule {
            /// Every built-in rule, in declaration order.
            pub const BUILTIN: &'static [Rule] = &[$(Rule::$variant),*];

            /// Resolve a PascalCase name to a rule. Unknown names become
            /// [`Rule::Custom`] and are looked up in the custom registry when
            /// evaluated.
            pub fn from_name(name: &str) -> Rule {
                match name {
                    $(stringify!($variant) => Rule::$variant,)*
                    other => Rule::Custom(other.to_string()),
                }
            }

            /// PascalCase dispatch name (`NotIn`).
            pub fn name(&self) -> &str {
                match self {
                    $(Rule::$variant => stringify!($variant),)*
                    Rule::Custom(name) => name,
                }
            }
        }
    };
}

builtin_rules!(
    Accepted,
    After,
    AfterOrEqual,
    Alpha,
    AlphaDash,
    AlphaNum,
    Array,
    Bail,
    Before,
    BeforeOrEqual,
    Between,
    Boolean,
    Confirmed,
    Date,
    DateBetween,
    Different,
    Digits,
    DigitsBetween,
    Email,
    Exists,
    Filled,
    In,
    Integer,
    Ip,
    Json,
    Max,
    Min,
    NotIn,
    Nullable,
    Numeric,
    Present,
    Regex,
    Required,
    RequiredIf,
    RequiredUnless,
    RequiredWith,
    RequiredWithAll,
    RequiredWithout,
    RequiredWithoutAll,
    Same,
    Size,
    Sometimes,
    String,
    Unique,
    Url,
);

/// Rules sharing the "measure then compare" size algorithm.
pub const SIZE_RULES: &[Rule] = &[Rule::Size, Rule::Between, Rule::Min, Rule::Max];

/// Rules that switch size measurement from length to numeric value.
pub const NUMERIC_RULES: &[Rule] = &[Rule::Numeric, Rule::Integer];

/// Rules meant to run even when the field is absent or empty.
///
/// Informational: the engine only skips rules on empty values through
/// `nullable`.
pub const IMPLICIT_RULES: &[Rule] = &[
    Rule::Required,
    Rule::Filled,
    Rule::RequiredWith,
    Rule::RequiredWithAll,
    Rule::RequiredWithout,
    Rule::RequiredWithoutAll,
    Rule::RequiredIf,
    Rule::RequiredUnless,
    Rule::Accepted,
    Rule::Present,
];

/// Rules whose outcome depends on another field's value.
pub const DEPENDENT_RULES: &[Rule] = &[
    Rule::RequiredWith,
    Rule::RequiredWithAll,
    Rule::RequiredWithout,
    Rule::RequiredWithoutAll,
    Rule::RequiredIf,
    Rule::RequiredUnless,
    Rule::Confirmed,
    Rule::Same,
    Rule::Different,
    Rule::Before,
    Rule::After,
];

/// Rules that demand a value. Their presence anywhere in a rule set
/// disables the empty-record short-circuit.
pub const REQUIRED_RULES: &[Rule] = &[
    Rule::Required,
    Rule::RequiredWith,
    Rule::RequiredWithAll,
    Rule::RequiredWithout,
    Rule::RequiredWithoutAll,
    Rule::RequiredIf,
    Rule::RequiredUnless,
];

impl Rule {
    /// Resolve a raw DSL token (`not_in`, `REQUIRED`) to a rule.
    pub fn from_token(token: &str) -> Rule {
        Rule::from_name(&pascal_case(token))
    }

    /// snake_case key used by message catalogs and overrides (`not_in`).
    pub fn message_key(&self) -> String {
        snake_case(self.name())
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Rule::Custom(_))
    }

    pub fn is_size(&self) -> bool {
        SIZE_RULES.contains(self)
    }

    pub fn is_numeric(&self) -> bool {
        NUMERIC_RULES.contains(self)
    }

    pub fn is_implicit(&self) -> bool {
        IMPLICIT_RULES.contains(self)
    }

    pub fn is_dependent(&self) -> bool {
        DEPENDENT_RULES.contains(self)
    }

    pub fn is_required_family(&self) -> bool {
        REQUIRED_RULES.contains(self)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// One parsed DSL token: a rule and its raw string parameters.
///
/// Parameters stay strings; each predicate coerces them as it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    pub rule: Rule,
    pub params: Vec<String>,
}

impl RuleDescriptor {
    pub fn new(rule: Rule, params: Vec<String>) -> Self {
        Self { rule, params }
    }

    /// PascalCase rule name.
    pub fn name(&self) -> &str {
        self.rule.name()
    }
}
