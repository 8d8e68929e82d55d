//! Built-in validation predicates.
//!
//! Every predicate has the same shape: it receives the [`RuleContext`] (the
//! whole record plus every field's parsed rules), the field under
//! validation, its value and the rule's raw parameters. `Ok(false)` is a
//! validation failure; `Err` is a broken rule configuration.

mod comparison;
mod date;
mod pattern;
mod presence;
mod size;
mod types;

use crate::error::{ConfigError, Result};
use crate::parser::RuleSet;
use crate::rule::{Rule, RuleDescriptor};
use crate::value::{Record, Value};

pub(crate) use date::parse_date;

/// Signature shared by all built-in predicates.
pub type Predicate = fn(&RuleContext<'_>, &str, &Value, &[String]) -> Result<bool>;

static EMPTY: Value = Value::String(String::new());

/// Read-only view of a validation run handed to predicates.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    data: &'a Record,
    rules: &'a RuleSet,
}

impl<'a> RuleContext<'a> {
    pub fn new(data: &'a Record, rules: &'a RuleSet) -> Self {
        Self { data, rules }
    }

    pub fn data(&self) -> &'a Record {
        self.data
    }

    /// Whether the key exists in the record, whatever its value.
    pub fn has_data(&self, field: &str) -> bool {
        self.data.contains_key(field)
    }

    /// The field's value; absent fields read as the empty string.
    pub fn value(&self, field: &str) -> &'a Value {
        self.data.get(field).unwrap_or(&EMPTY)
    }

    /// The field's value, `None` when the key is absent.
    pub fn field_value(&self, field: &str) -> Option<&'a Value> {
        self.data.get(field)
    }

    /// First descriptor on `field` whose rule is one of `rules`.
    pub fn get_rule(&self, field: &str, rules: &[Rule]) -> Option<&'a RuleDescriptor> {
        self.rules
            .get(field)?
            .iter()
            .find(|descriptor| rules.contains(&descriptor.rule))
    }

    pub fn has_rule(&self, field: &str, rules: &[Rule]) -> bool {
        self.get_rule(field, rules).is_some()
    }
}

/// Look up the built-in predicate for a rule. Custom rules have none.
pub fn builtin(rule: &Rule) -> Option<Predicate> {
    let predicate: Predicate = match rule {
        Rule::Accepted => presence::accepted,
        Rule::After => date::after,
        Rule::AfterOrEqual => date::after_or_equal,
        Rule::Alpha => pattern::alpha,
        Rule::AlphaDash => pattern::alpha_dash,
        Rule::AlphaNum => pattern::alpha_num,
        Rule::Array => types::array,
        Rule::Bail | Rule::Nullable | Rule::Sometimes => always_pass,
        Rule::Before => date::before,
        Rule::BeforeOrEqual => date::before_or_equal,
        Rule::Between => size::between,
        Rule::Boolean => types::boolean,
        Rule::Confirmed => comparison::confirmed,
        Rule::Date => date::date,
        Rule::DateBetween => date::date_between,
        Rule::Different => comparison::different,
        Rule::Digits => size::digits,
        Rule::DigitsBetween => size::digits_between,
        Rule::Email => pattern::email,
        Rule::Exists => exists,
        Rule::Filled => presence::filled,
        Rule::In => comparison::in_list,
        Rule::Integer => pattern::integer,
        Rule::Ip => pattern::ip,
        Rule::Json => types::json,
        Rule::Max => size::max,
        Rule::Min => size::min,
        Rule::NotIn => comparison::not_in_list,
        Rule::Numeric => pattern::numeric,
        Rule::Present => presence::present,
        Rule::Regex => pattern::regex,
        Rule::Required => presence::required,
        Rule::RequiredIf => presence::required_if,
        Rule::RequiredUnless => presence::required_unless,
        Rule::RequiredWith => presence::required_with,
        Rule::RequiredWithAll => presence::required_with_all,
        Rule::RequiredWithout => presence::required_without,
        Rule::RequiredWithoutAll => presence::required_without_all,
        Rule::Same => comparison::same,
        Rule::Size => size::size,
        Rule::String => types::string,
        Rule::Unique => unique,
        Rule::Url => pattern::url,
        Rule::Custom(_) => return None,
    };
    Some(predicate)
}

/// Fail with [`ConfigError::MissingParameters`] when fewer than `count`
/// parameters were supplied.
pub(crate) fn require_params(count: usize, params: &[String], rule: &str) -> Result<()> {
    if params.len() < count {
        return Err(ConfigError::MissingParameters {
            rule: rule.to_string(),
            expected: count,
            given: params.len(),
        });
    }
    Ok(())
}

/// `nullable`, `sometimes` and `bail` are engine markers.
fn always_pass(_: &RuleContext<'_>, _: &str, _: &Value, _: &[String]) -> Result<bool> {
    Ok(true)
}

// Database lookups are out of reach for an in-memory engine.
fn exists(_: &RuleContext<'_>, _: &str, _: &Value, _: &[String]) -> Result<bool> {
    Err(ConfigError::UnsupportedRule("exists".to_string()))
}

fn unique(_: &RuleContext<'_>, _: &str, _: &Value, _: &[String]) -> Result<bool> {
    Err(ConfigError::UnsupportedRule("unique".to_string()))
}
