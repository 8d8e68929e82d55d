//! Failure message lookup and placeholder substitution.
//!
//! A template is chosen from, in order: the `"field.rule"` override, the
//! `"rule"` override and the catalog. It then goes through the attribute
//! placeholders (`:attr`, `:Attr`, `:ATTR`) and the rule's own replacer.

use crate::case::{snake_case, title_case};
use crate::catalog::{DataType, MessageCatalog};
use crate::overrides::{CustomMessages, CustomNames, CustomValues};
use crate::predicates::{parse_date, RuleContext};
use crate::rule::{Rule, RuleDescriptor, NUMERIC_RULES};

/// Rewrites rule-specific placeholders in an attribute-substituted message.
type Replacer = fn(&MessageFormatter<'_>, String, &str, &[String]) -> String;

/// Formats failure messages for one validation run.
#[derive(Debug, Clone, Copy)]
pub struct MessageFormatter<'a> {
    catalog: &'a MessageCatalog,
    messages: &'a CustomMessages,
    names: &'a CustomNames,
    values: &'a CustomValues,
    ctx: RuleContext<'a>,
}

impl<'a> MessageFormatter<'a> {
    pub fn new(
        catalog: &'a MessageCatalog,
        messages: &'a CustomMessages,
        names: &'a CustomNames,
        values: &'a CustomValues,
        ctx: RuleContext<'a>,
    ) -> Self {
        Self {
            catalog,
            messages,
            names,
            values,
            ctx,
        }
    }

    /// The finished message for a failed rule.
    pub fn format(&self, field: &str, descriptor: &RuleDescriptor) -> String {
        let template = self.get_message(field, &descriptor.rule);
        self.do_replacements(&template, field, descriptor)
    }

    /// The raw template for a rule on a field, or `""` when nothing matches.
    pub fn get_message(&self, field: &str, rule: &Rule) -> String {
        let key = rule.message_key();
        let data_type = self.data_type(field);

        self.messages
            .get(&format!("{field}.{key}"))
            .and_then(|template| template.resolve(data_type))
            .or_else(|| self.messages.get(&key)?.resolve(data_type))
            .or_else(|| self.catalog.get(&key)?.resolve(data_type))
            .unwrap_or_default()
            .to_string()
    }

    /// How a field is treated when picking a size message.
    pub fn data_type(&self, field: &str) -> DataType {
        if self.ctx.has_rule(field, NUMERIC_RULES) {
            DataType::Numeric
        } else if self.ctx.has_rule(field, &[Rule::Array]) {
            DataType::Array
        } else {
            DataType::String
        }
    }

    /// Substitute the attribute placeholders, then the rule's own.
    pub fn do_replacements(&self, template: &str, field: &str, descriptor: &RuleDescriptor) -> String {
        if template.trim().is_empty() {
            return String::new();
        }

        let name = self.display_name(field);
        let message = template
            .replace(":ATTR", &name.to_uppercase())
            .replace(":Attr", &title_case(&name))
            .replace(":attr", &name);

        match replacer(&descriptor.rule) {
            Some(replace) => replace(self, message, field, &descriptor.params),
            None => message,
        }
    }

    /// Custom name if one is registered, otherwise the field key in
    /// lowercase words (`threeWordProperty` reads "three word property").
    pub fn display_name(&self, field: &str) -> String {
        match self.names.get(field) {
            Some(name) => name.clone(),
            None => snake_case(field).replace('_', " "),
        }
    }

    /// Custom display text for one of a field's raw values.
    pub fn displayable_value(&self, field: &str, value: &str) -> String {
        self.values
            .get(field)
            .and_then(|values| values.get(value))
            .cloned()
            .unwrap_or_else(|| value.to_string())
    }

    /// A date parameter reads as itself when it is a literal date and as
    /// the named field's display name otherwise.
    fn date_param(&self, param: &str) -> String {
        if !self.ctx.has_data(param) && parse_date(&param.into()).is_some() {
            param.to_string()
        } else {
            self.display_name(param)
        }
    }
}

fn param(params: &[String], index: usize) -> &str {
    params.get(index).map(String::as_str).unwrap_or_default()
}

fn replacer(rule: &Rule) -> Option<Replacer> {
    let replacer: Replacer = match rule {
        Rule::Between | Rule::DigitsBetween => replace_between,
        Rule::Digits => replace_digits,
        Rule::Min => replace_min,
        Rule::Max => replace_max,
        Rule::Size => replace_size,
        Rule::In | Rule::NotIn => replace_values,
        Rule::RequiredWith
        | Rule::RequiredWithAll
        | Rule::RequiredWithout
        | Rule::RequiredWithoutAll => replace_field_list,
        Rule::RequiredIf => replace_required_if,
        Rule::RequiredUnless => replace_required_unless,
        Rule::Same | Rule::Different => replace_other,
        Rule::Before | Rule::After | Rule::BeforeOrEqual | Rule::AfterOrEqual => replace_date,
        Rule::DateBetween => replace_date_between,
        _ => return None,
    };
    Some(replacer)
}

fn replace_between(_: &MessageFormatter<'_>, message: String, _: &str, params: &[String]) -> String {
    message
        .replace(":min", param(params, 0))
        .replace(":max", param(params, 1))
}

fn replace_digits(_: &MessageFormatter<'_>, message: String, _: &str, params: &[String]) -> String {
    message.replace(":digits", param(params, 0))
}

fn replace_min(_: &MessageFormatter<'_>, message: String, _: &str, params: &[String]) -> String {
    message.replace(":min", param(params, 0))
}

fn replace_max(_: &MessageFormatter<'_>, message: String, _: &str, params: &[String]) -> String {
    message.replace(":max", param(params, 0))
}

fn replace_size(_: &MessageFormatter<'_>, message: String, _: &str, params: &[String]) -> String {
    message.replace(":size", param(params, 0))
}

fn replace_values(f: &MessageFormatter<'_>, message: String, field: &str, params: &[String]) -> String {
    let values: Vec<String> = params.iter().map(|p| f.displayable_value(field, p)).collect();
    message.replace(":values", &values.join(", "))
}

fn replace_field_list(f: &MessageFormatter<'_>, message: String, _: &str, params: &[String]) -> String {
    let names: Vec<String> = params.iter().map(|p| f.display_name(p)).collect();
    message.replace(":values", &names.join(" / "))
}

fn replace_required_if(
    f: &MessageFormatter<'_>,
    message: String,
    _: &str,
    params: &[String],
) -> String {
    let other = param(params, 0);
    let value = f.ctx.value(other).to_text();
    message
        .replace(":other", &f.display_name(other))
        .replace(":value", &f.displayable_value(other, &value))
}

fn replace_required_unless(
    f: &MessageFormatter<'_>,
    message: String,
    _: &str,
    params: &[String],
) -> String {
    let other = param(params, 0);
    let values: Vec<String> = params
        .iter()
        .skip(1)
        .map(|p| f.displayable_value(other, p))
        .collect();
    message
        .replace(":other", &f.display_name(other))
        .replace(":values", &values.join(", "))
}

fn replace_other(f: &MessageFormatter<'_>, message: String, _: &str, params: &[String]) -> String {
    message.replace(":other", &f.display_name(param(params, 0)))
}

fn replace_date(f: &MessageFormatter<'_>, message: String, _: &str, params: &[String]) -> String {
    message.replace(":date", &f.date_param(param(params, 0)))
}

fn replace_date_between(
    f: &MessageFormatter<'_>,
    message: String,
    _: &str,
    params: &[String],
) -> String {
    message
        .replace(":start", &f.date_param(param(params, 0)))
        .replace(":end", &f.date_param(param(params, 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MessageTemplate;
    use crate::overrides::Overrides;
    use crate::parser::{parse_rules, RuleSet};
    use crate::value::{record, Record};
    use serde_json::json;

    struct Fixture {
        catalog: MessageCatalog,
        overrides: Overrides,
        data: Record,
        rules: RuleSet,
    }

    impl Fixture {
        fn new(data: serde_json::Value, rules: &[(&str, &str)]) -> Self {
            Self {
                catalog: MessageCatalog::english(),
                overrides: Overrides::new(),
                data: record(data),
                rules: parse_rules(rules.iter().copied()),
            }
        }

        fn overrides(mut self, overrides: Overrides) -> Self {
            self.overrides = overrides;
            self
        }

        /// Message for the `index`th rule on `field`.
        fn message(&self, field: &str, index: usize) -> String {
            let ctx = RuleContext::new(&self.data, &self.rules);
            let formatter = MessageFormatter::new(
                &self.catalog,
                &self.overrides.messages,
                &self.overrides.names,
                &self.overrides.values,
                ctx,
            );
            formatter.format(field, &self.rules[field][index])
        }
    }

    #[test]
    fn default_catalog_messages() {
        let fixture = Fixture::new(json!({ "name": "" }), &[("name", "required|min:3")]);
        assert_eq!(fixture.message("name", 0), "The name field is required.");
        assert_eq!(fixture.message("name", 1), "The name must be at least 3 characters.");
    }

    #[test]
    fn size_messages_follow_data_type() {
        let fixture = Fixture::new(
            json!({}),
            &[("age", "numeric|min:20"), ("tags", "array|max:2"), ("name", "size:2")],
        );
        assert_eq!(fixture.message("age", 1), "The age must be at least 20.");
        assert_eq!(fixture.message("tags", 1), "The tags may not have more than 2 items.");
        assert_eq!(fixture.message("name", 0), "The name must be 2 characters.");
    }

    #[test]
    fn field_specific_override_wins() {
        let fixture = Fixture::new(json!({}), &[("name", "required"), ("email", "required")])
            .overrides(
                Overrides::new()
                    .message("name.required", "You must provide the :attr.")
                    .message("required", ":Attr field is required."),
            );
        assert_eq!(fixture.message("name", 0), "You must provide the name.");
        assert_eq!(fixture.message("email", 0), "Email field is required.");
    }

    #[test]
    fn attribute_placeholder_cases() {
        let fixture = Fixture::new(json!({}), &[("firstName", "filled")]).overrides(
            Overrides::new().message("filled", ":ATTR / :Attr / :attr"),
        );
        assert_eq!(fixture.message("firstName", 0), "FIRST NAME / First Name / first name");
    }

    #[test]
    fn custom_names_replace_attribute() {
        let fixture = Fixture::new(json!({}), &[("name", "required")])
            .overrides(Overrides::new().name("name", "Name"));
        assert_eq!(fixture.message("name", 0), "The Name field is required.");
    }

    #[test]
    fn camel_case_fields_read_as_words() {
        let fixture = Fixture::new(json!({}), &[("threeWordProperty", "required")]);
        assert_eq!(
            fixture.message("threeWordProperty", 0),
            "The three word property field is required."
        );
    }

    #[test]
    fn required_if_shows_other_value() {
        let fixture = Fixture::new(json!({ "color": "1" }), &[("bar", "required_if:color,1")])
            .overrides(Overrides::new().value("color", "1", "Red"));
        assert_eq!(fixture.message("bar", 0), "The bar field is required when color is Red.");
    }

    #[test]
    fn in_lists_displayable_values() {
        let fixture = Fixture::new(json!({ "type": "3" }), &[("type", "in:5,300")]).overrides(
            Overrides::new()
                .message("in", ":attr must be included in :values.")
                .value("type", "5", "Short")
                .value("type", "300", "Long"),
        );
        assert_eq!(fixture.message("type", 0), "type must be included in Short, Long.");
    }

    #[test]
    fn required_with_lists_field_names() {
        let fixture = Fixture::new(json!({}), &[("c", "required_with:firstName,last_name")]);
        assert_eq!(
            fixture.message("c", 0),
            "The c field is required when first name / last name is present."
        );
    }

    #[test]
    fn other_field_and_date_placeholders() {
        let fixture = Fixture::new(
            json!({ "startDate": "2000-01-01" }),
            &[
                ("password", "same:passwordRepeat"),
                ("end", "after:startDate|before:2001-01-01|date_between:2000-01-01,startDate"),
            ],
        );
        assert_eq!(fixture.message("password", 0), "The password and password repeat must match.");
        assert_eq!(fixture.message("end", 0), "The end must be a date after start date.");
        assert_eq!(fixture.message("end", 1), "The end must be a date before 2001-01-01.");
        assert_eq!(
            fixture.message("end", 2),
            "The end must be between 2000-01-01 and start date."
        );
    }

    #[test]
    fn blank_templates_stay_blank() {
        let mut fixture = Fixture::new(json!({}), &[("name", "required"), ("id", "mongo_id")]);
        fixture.catalog = MessageCatalog::new().with_entry("required", "  ");
        assert_eq!(fixture.message("name", 0), "");
        assert_eq!(fixture.message("id", 0), "");
    }

    #[test]
    fn typed_overrides_resolve_by_data_type() {
        let fixture = Fixture::new(json!({}), &[("name", "min:3")]).overrides(
            Overrides::new().message(
                "min",
                MessageTemplate::ByType(
                    [(DataType::String, "Too short: :attr < :min".to_string())].into(),
                ),
            ),
        );
        assert_eq!(fixture.message("name", 0), "Too short: name < 3");
    }

    #[test]
    fn typed_field_override_without_entry_falls_through() {
        let numeric_only = MessageTemplate::ByType(
            [(DataType::Numeric, "numeric :attr :min".to_string())].into(),
        );
        let fixture = Fixture::new(json!({ "name": "ab" }), &[("name", "min:3")]).overrides(
            Overrides::new()
                .message("name.min", numeric_only.clone())
                .message("min", "rule-wide :attr :min"),
        );
        assert_eq!(fixture.message("name", 0), "rule-wide name 3");

        let fixture = Fixture::new(json!({ "name": "ab" }), &[("name", "min:3")])
            .overrides(Overrides::new().message("name.min", numeric_only));
        assert_eq!(fixture.message("name", 0), "The name must be at least 3 characters.");
    }
}
