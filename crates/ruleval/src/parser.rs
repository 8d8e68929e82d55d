//! Rule-string DSL parsing.
//!
//! A field's rules come either as one pipe-delimited string
//! (`"required|between:3,8"`) or as a list of tokens
//! (`["required", "between:3,8"]`). Each token is `name[:arg,arg...]`.

use crate::error::Result;
use crate::rule::{Rule, RuleDescriptor};
use indexmap::IndexMap;
use serde::Deserialize;

/// Raw rules for one field: a pipe string or a token list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RuleSpec {
    /// `"rule1|rule2:arg1,arg2"`
    Pipe(String),
    /// `["rule1", "rule2:arg1,arg2"]`
    List(Vec<String>),
}

impl From<&str> for RuleSpec {
    fn from(spec: &str) -> Self {
        RuleSpec::Pipe(spec.to_string())
    }
}

impl From<String> for RuleSpec {
    fn from(spec: String) -> Self {
        RuleSpec::Pipe(spec)
    }
}

impl From<Vec<&str>> for RuleSpec {
    fn from(tokens: Vec<&str>) -> Self {
        RuleSpec::List(tokens.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for RuleSpec {
    fn from(tokens: Vec<String>) -> Self {
        RuleSpec::List(tokens)
    }
}

impl<const N: usize> From<[&str; N]> for RuleSpec {
    fn from(tokens: [&str; N]) -> Self {
        RuleSpec::List(tokens.iter().map(|t| t.to_string()).collect())
    }
}

/// Parsed descriptors for every field, in declaration order.
pub type RuleSet = IndexMap<String, Vec<RuleDescriptor>>;

/// Parse one field's rules into ordered descriptors.
///
/// Blank tokens are dropped, so `"|required||"` is just `required`. The
/// argument segment of `regex` is kept whole because patterns routinely
/// contain commas.
///
/// ```
/// use ruleval::parser::parse_rule_spec;
/// use ruleval::rule::Rule;
///
/// let rules = parse_rule_spec(&"required|not_in:admin,exec".into());
/// assert_eq!(rules[0].rule, Rule::Required);
/// assert_eq!(rules[1].rule, Rule::NotIn);
/// assert_eq!(rules[1].params, vec!["admin", "exec"]);
/// ```
pub fn parse_rule_spec(spec: &RuleSpec) -> Vec<RuleDescriptor> {
    match spec {
        RuleSpec::Pipe(s) => s.split('|').filter_map(parse_token).collect(),
        RuleSpec::List(tokens) => tokens.iter().filter_map(|t| parse_token(t)).collect(),
    }
}

/// Parse a whole rule table, keeping field order.
pub fn parse_rules<I, K, S>(rules: I) -> RuleSet
where
    I: IntoIterator<Item = (K, S)>,
    K: Into<String>,
    S: Into<RuleSpec>,
{
    rules
        .into_iter()
        .map(|(field, spec)| (field.into(), parse_rule_spec(&spec.into())))
        .collect()
}

/// Parse a rule table from JSON: an object of field to a pipe string or a
/// list of tokens.
pub fn parse_rule_set(json: serde_json::Value) -> Result<RuleSet> {
    let specs: IndexMap<String, RuleSpec> = serde_json::from_value(json)?;
    Ok(parse_rules(specs))
}

fn parse_token(token: &str) -> Option<RuleDescriptor> {
    if token.trim().is_empty() {
        return None;
    }

    let (name, args) = match token.split_once(':') {
        Some((name, args)) => (name.trim(), args),
        None => (token.trim(), ""),
    };
    let rule = Rule::from_token(name);

    let params = if args.is_empty() {
        Vec::new()
    } else if rule == Rule::Regex {
        vec![args.to_string()]
    } else {
        args.split(',').map(str::to_string).collect()
    };

    Some(RuleDescriptor::new(rule, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(descriptors: &[RuleDescriptor]) -> Vec<&str> {
        descriptors.iter().map(RuleDescriptor::name).collect()
    }

    #[test]
    fn parses_piped_rules_in_order() {
        let rules = parse_rule_spec(&"required|min:3".into());
        assert_eq!(
            rules,
            vec![
                RuleDescriptor::new(Rule::Required, vec![]),
                RuleDescriptor::new(Rule::Min, vec!["3".to_string()]),
            ]
        );
    }

    #[test]
    fn parses_token_lists() {
        let rules = parse_rule_spec(&vec!["required", "string"].into());
        assert_eq!(names(&rules), vec!["Required", "String"]);
    }

    #[test]
    fn splits_arguments_on_commas() {
        let rules = parse_rule_spec(&"not_in:admin,exec".into());
        assert_eq!(rules, vec![RuleDescriptor::new(
            Rule::NotIn,
            vec!["admin".to_string(), "exec".to_string()]
        )]);
    }

    #[test]
    fn drops_blank_tokens() {
        let rules = parse_rule_spec(&"|||required| |".into());
        assert_eq!(names(&rules), vec!["Required"]);

        let rules = parse_rule_spec(&vec!["", "  ", "email"].into());
        assert_eq!(names(&rules), vec!["Email"]);
    }

    #[test]
    fn regex_argument_is_not_split() {
        let rules = parse_rule_spec(&"regex:/^[0-9]{1,8}$/|required".into());
        assert_eq!(rules[0].params, vec!["/^[0-9]{1,8}$/"]);
        assert_eq!(rules[1].rule, Rule::Required);

        let rules = parse_rule_spec(&vec!["regex:/a,b,c/i"].into());
        assert_eq!(rules[0].params, vec!["/a,b,c/i"]);
    }

    #[test]
    fn only_first_colon_separates_arguments() {
        let rules = parse_rule_spec(&vec!["regex:/^\\d{2}:\\d{2}$/"].into());
        assert_eq!(rules[0].params, vec!["/^\\d{2}:\\d{2}$/"]);
    }

    #[test]
    fn empty_argument_segment_has_no_params() {
        let rules = parse_rule_spec(&"min:".into());
        assert!(rules[0].params.is_empty());
    }

    #[test]
    fn unknown_names_are_kept_as_custom() {
        let rules = parse_rule_spec(&"mongo_id:min=24,max=24".into());
        assert_eq!(rules[0].rule, Rule::Custom("MongoId".to_string()));
        assert_eq!(rules[0].params, vec!["min=24", "max=24"]);
    }

    #[test]
    fn parses_rule_tables_from_json() {
        let set = parse_rule_set(json!({
            "name": "required|min:3",
            "group": ["not_in:admin,exec"],
        }))
        .unwrap();

        let fields: Vec<_> = set.keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["name", "group"]);
        assert_eq!(names(&set["group"]), vec!["NotIn"]);
    }

    #[test]
    fn rejects_malformed_rule_tables() {
        assert!(parse_rule_set(json!({ "name": 3 })).is_err());
    }
}
