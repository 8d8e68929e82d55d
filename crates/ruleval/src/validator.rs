//! The validation session.

use crate::catalog::{MessageCatalog, MessageTemplate};
use crate::error::{ConfigError, Result, ValidationErrors};
use crate::formatter::MessageFormatter;
use crate::overrides::{CustomMessages, CustomNames, CustomValues, Overrides};
use crate::parser::{parse_rules, RuleSet, RuleSpec};
use crate::predicates::{self, RuleContext};
use crate::registry::CustomRules;
use crate::rule::{Rule, RuleDescriptor};
use crate::value::{Record, Value};
use indexmap::IndexMap;
use std::sync::Arc;

/// Field to PascalCase rule name to the parameters of each failed rule.
pub type FailedRules = IndexMap<String, IndexMap<String, Vec<String>>>;

/// One rule set bound to one data record.
///
/// Rules are parsed once at construction; [`set_data`](Self::set_data)
/// swaps the record so the same session can check many records. Every call
/// to [`passes`](Self::passes) recomputes the error state from scratch.
///
/// ```
/// use ruleval::{record, Validator};
/// use serde_json::json;
///
/// let mut validator = Validator::new(
///     record(json!({ "name": "", "email": "rati@example.com" })),
///     [("name", "required|min:3"), ("email", "required|email")],
/// );
///
/// assert!(validator.fails().unwrap());
/// assert_eq!(
///     validator.error("name").unwrap(),
///     ["The name field is required.", "The name must be at least 3 characters."]
/// );
/// assert_eq!(validator.valid().unwrap(), ["email"]);
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    data: Record,
    rules: RuleSet,
    catalog: Arc<MessageCatalog>,
    messages: CustomMessages,
    names: CustomNames,
    values: CustomValues,
    custom_rules: CustomRules,
    errors: ValidationErrors,
    failed: FailedRules,
    evaluated: bool,
}

impl Validator {
    /// Create a session from a record and a `field -> rules` table.
    pub fn new<I, K, S>(data: Record, rules: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<RuleSpec>,
    {
        Self::from_rule_set(data, parse_rules(rules))
    }

    /// Alias for [`Validator::new`].
    pub fn make<I, K, S>(data: Record, rules: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<RuleSpec>,
    {
        Self::new(data, rules)
    }

    /// Create a session from already parsed rules.
    pub fn from_rule_set(data: Record, rules: RuleSet) -> Self {
        Self {
            data,
            rules,
            catalog: MessageCatalog::shared_default(),
            messages: CustomMessages::new(),
            names: CustomNames::new(),
            values: CustomValues::new(),
            custom_rules: CustomRules::new(),
            errors: ValidationErrors::new(),
            failed: FailedRules::new(),
            evaluated: false,
        }
    }

    /// Use another message catalog instead of the built-in English one.
    pub fn with_catalog(mut self, catalog: Arc<MessageCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Merge custom messages into the session. Keys already present,
    /// including messages registered through
    /// [`extend_with_message`](Self::extend_with_message), are overwritten
    /// only by the same key.
    pub fn with_custom_messages(mut self, messages: CustomMessages) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Replace the custom attribute names.
    pub fn with_custom_names(mut self, names: CustomNames) -> Self {
        self.names = names;
        self
    }

    /// Merge all three override tables into the session.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.messages.extend(overrides.messages);
        self.add_custom_names(overrides.names);
        self.add_custom_values(overrides.values);
        self
    }

    /// Run every rule and report whether the record is valid.
    ///
    /// Validation failures are recorded and available through
    /// [`errors`](Self::errors); `Err` means the rule set itself is broken.
    pub fn passes(&mut self) -> Result<bool> {
        self.errors.clear();
        self.failed.clear();
        self.evaluated = false;

        let (errors, failed) = self.evaluate()?;
        trace_debug!(
            fields = self.rules.len(),
            failed_fields = errors.field_names().len(),
            "validation finished"
        );

        self.errors = errors;
        self.failed = failed;
        self.evaluated = true;
        Ok(self.errors.is_empty())
    }

    /// Negation of [`passes`](Self::passes), with the same side effects.
    pub fn fails(&mut self) -> Result<bool> {
        Ok(!self.passes()?)
    }

    /// Record fields without errors, in record order.
    pub fn valid(&mut self) -> Result<Vec<String>> {
        self.ensure_evaluated()?;
        Ok(self
            .data
            .keys()
            .filter(|field| !self.errors.contains(field))
            .cloned()
            .collect())
    }

    /// Fields with at least one error, in the order they first failed.
    pub fn invalid(&mut self) -> Result<Vec<String>> {
        self.ensure_evaluated()?;
        Ok(self
            .errors
            .field_names()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    fn ensure_evaluated(&mut self) -> Result<()> {
        if !self.evaluated {
            self.passes()?;
        }
        Ok(())
    }

    fn evaluate(&self) -> Result<(ValidationErrors, FailedRules)> {
        let mut errors = ValidationErrors::new();
        let mut failed = FailedRules::new();

        if self.data.is_empty() && !self.requires_any_value() {
            trace_debug!("empty record without required rules, nothing to check");
            return Ok((errors, failed));
        }

        let ctx = RuleContext::new(&self.data, &self.rules);
        let formatter = MessageFormatter::new(
            &self.catalog,
            &self.messages,
            &self.names,
            &self.values,
            ctx,
        );

        for (field, descriptors) in &self.rules {
            let value = ctx.value(field);
            if value.is_falsy() && ctx.has_rule(field, &[Rule::Nullable]) {
                continue;
            }
            let bail = ctx.has_rule(field, &[Rule::Bail]);

            for descriptor in descriptors.iter().filter(|d| d.rule != Rule::Nullable) {
                if bail && errors.contains(field) {
                    break;
                }
                if self.check(&ctx, field, value, descriptor)? {
                    continue;
                }

                trace_trace!(field = %field, rule = descriptor.name(), "rule failed");
                errors.add(field.as_str(), formatter.format(field, descriptor));
                failed
                    .entry(field.clone())
                    .or_default()
                    .insert(descriptor.name().to_string(), descriptor.params.clone());
            }
        }

        Ok((errors, failed))
    }

    /// Built-ins first, then the custom registry.
    fn check(
        &self,
        ctx: &RuleContext<'_>,
        field: &str,
        value: &Value,
        descriptor: &RuleDescriptor,
    ) -> Result<bool> {
        let result = match predicates::builtin(&descriptor.rule) {
            Some(predicate) => predicate(ctx, field, value, &descriptor.params),
            None => match self.custom_rules.get(descriptor.name()) {
                Some(rule) => Ok(rule(field, value, &descriptor.params)),
                None => Err(ConfigError::UnknownRule(descriptor.rule.message_key())),
            },
        };

        result.map_err(|err| {
            trace_warn!(field = %field, rule = descriptor.name(), error = %err, "invalid rule configuration");
            err
        })
    }

    fn requires_any_value(&self) -> bool {
        self.rules
            .values()
            .flatten()
            .any(|descriptor| descriptor.rule.is_required_family())
    }

    /// Formatted messages from the last run.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Messages for one field, `None` when it has no errors.
    pub fn error(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field)
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains(field)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Failed rules and their parameters from the last run.
    pub fn failed(&self) -> &FailedRules {
        &self.failed
    }

    /// Swap in a new record, keeping the parsed rules and overrides.
    pub fn set_data(&mut self, data: Record) {
        self.data = data;
        self.errors.clear();
        self.failed.clear();
        self.evaluated = false;
    }

    pub fn data(&self) -> &Record {
        &self.data
    }

    /// A field's value in the current record.
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn has_rule(&self, field: &str, rules: &[Rule]) -> bool {
        self.get_rule(field, rules).is_some()
    }

    /// First rule on `field` that is one of `rules`.
    pub fn get_rule(&self, field: &str, rules: &[Rule]) -> Option<&RuleDescriptor> {
        self.rules
            .get(field)?
            .iter()
            .find(|descriptor| rules.contains(&descriptor.rule))
    }

    /// Register a custom rule under the PascalCase form of `name`.
    ///
    /// Built-in rules cannot be replaced: a custom rule named like one is
    /// never consulted.
    ///
    /// ```
    /// use ruleval::{record, Validator};
    /// use serde_json::json;
    ///
    /// let mut validator = Validator::new(record(json!({ "id": "abc" })), [("id", "mongo_id")]);
    /// validator.extend("mongo_id", |_, value, _| value.to_text().len() == 24);
    /// assert!(validator.fails().unwrap());
    /// ```
    pub fn extend<F>(&mut self, name: &str, predicate: F) -> &mut Self
    where
        F: Fn(&str, &Value, &[String]) -> bool + Send + Sync + 'static,
    {
        self.custom_rules.register(name, predicate);
        self
    }

    /// [`extend`](Self::extend), also registering the rule's message.
    pub fn extend_with_message<F>(
        &mut self,
        name: &str,
        predicate: F,
        message: impl Into<String>,
    ) -> &mut Self
    where
        F: Fn(&str, &Value, &[String]) -> bool + Send + Sync + 'static,
    {
        let key = self.custom_rules.register(name, predicate);
        let key = Rule::from_name(&key).message_key();
        self.messages.insert(key, MessageTemplate::Text(message.into()));
        self
    }

    /// Merge display names into the existing table.
    pub fn add_custom_names<I, K, V>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.names
            .extend(names.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Replace the display name table.
    pub fn set_custom_names(&mut self, names: CustomNames) -> &mut Self {
        self.names = names;
        self
    }

    /// Merge display values, field by field.
    pub fn add_custom_values(&mut self, values: CustomValues) -> &mut Self {
        for (field, table) in values {
            self.values.entry(field).or_default().extend(table);
        }
        self
    }

    /// Replace the display value table.
    pub fn set_value_names(&mut self, values: CustomValues) -> &mut Self {
        self.values = values;
        self
    }

    pub fn custom_values(&self) -> &CustomValues {
        &self.values
    }

    pub fn custom_names(&self) -> &CustomNames {
        &self.names
    }
}
