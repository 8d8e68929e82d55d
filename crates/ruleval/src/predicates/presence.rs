//! Presence rules: `required` and its conditional variants, `present`,
//! `filled` and `accepted`.

use super::{require_params, RuleContext};
use crate::error::Result;
use crate::value::{format_number, Value};
use std::borrow::Cow;

/// A value satisfies `required` unless it is null, a blank string or an
/// empty array.
pub(crate) fn is_required(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

pub(super) fn required(_: &RuleContext<'_>, _: &str, value: &Value, _: &[String]) -> Result<bool> {
    Ok(is_required(value))
}

pub(super) fn present(ctx: &RuleContext<'_>, field: &str, _: &Value, _: &[String]) -> Result<bool> {
    Ok(ctx.has_data(field))
}

/// Absent passes; present must be non-empty.
pub(super) fn filled(ctx: &RuleContext<'_>, field: &str, value: &Value, _: &[String]) -> Result<bool> {
    Ok(!ctx.has_data(field) || is_required(value))
}

pub(super) fn accepted(_: &RuleContext<'_>, _: &str, value: &Value, _: &[String]) -> Result<bool> {
    let accepted = match value {
        Value::String(s) => matches!(s.as_str(), "yes" | "on" | "1" | "true"),
        Value::Number(n) => *n == 1.0,
        Value::Bool(b) => *b,
        _ => false,
    };
    Ok(accepted)
}

fn any_failing(ctx: &RuleContext<'_>, fields: &[String]) -> bool {
    fields.iter().any(|f| !is_required(ctx.value(f)))
}

fn all_failing(ctx: &RuleContext<'_>, fields: &[String]) -> bool {
    fields.iter().all(|f| !is_required(ctx.value(f)))
}

/// Required when any of the named fields is filled.
pub(super) fn required_with(
    ctx: &RuleContext<'_>,
    _: &str,
    value: &Value,
    params: &[String],
) -> Result<bool> {
    require_params(1, params, "required_with")?;
    Ok(all_failing(ctx, params) || is_required(value))
}

/// Required when all of the named fields are filled.
pub(super) fn required_with_all(
    ctx: &RuleContext<'_>,
    _: &str,
    value: &Value,
    params: &[String],
) -> Result<bool> {
    require_params(1, params, "required_with_all")?;
    Ok(any_failing(ctx, params) || is_required(value))
}

/// Required when any of the named fields is empty.
pub(super) fn required_without(
    ctx: &RuleContext<'_>,
    _: &str,
    value: &Value,
    params: &[String],
) -> Result<bool> {
    require_params(1, params, "required_without")?;
    Ok(!any_failing(ctx, params) || is_required(value))
}

/// Required when all of the named fields are empty.
pub(super) fn required_without_all(
    ctx: &RuleContext<'_>,
    _: &str,
    value: &Value,
    params: &[String],
) -> Result<bool> {
    require_params(1, params, "required_without_all")?;
    Ok(!all_failing(ctx, params) || is_required(value))
}

/// String form used when comparing another field against rule parameters.
/// Only scalars compare; `true` reads as `"true"`.
pub(super) fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Bool(true) => Some(Cow::Borrowed("true")),
        Value::Bool(false) => Some(Cow::Borrowed("false")),
        Value::Number(n) => Some(Cow::Owned(format_number(*n))),
        _ => None,
    }
}

fn other_matches(ctx: &RuleContext<'_>, other: &str, candidates: &[String]) -> bool {
    scalar_text(ctx.value(other)).map_or(false, |text| candidates.iter().any(|c| *c == text))
}

/// `required_if:other,v1,v2...`: required when `other` equals any listed value.
pub(super) fn required_if(
    ctx: &RuleContext<'_>,
    _: &str,
    value: &Value,
    params: &[String],
) -> Result<bool> {
    require_params(2, params, "required_if")?;
    if other_matches(ctx, &params[0], &params[1..]) {
        return Ok(is_required(value));
    }
    Ok(true)
}

/// `required_unless:other,v1,v2...`: required unless `other` equals any
/// listed value.
pub(super) fn required_unless(
    ctx: &RuleContext<'_>,
    _: &str,
    value: &Value,
    params: &[String],
) -> Result<bool> {
    require_params(2, params, "required_unless")?;
    if other_matches(ctx, &params[0], &params[1..]) {
        return Ok(true);
    }
    Ok(is_required(value))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{last, try_run};
    use super::*;
    use crate::error::ConfigError;
    use serde_json::json;

    #[test]
    fn required_rejects_empty_values() {
        assert!(!is_required(&Value::Null));
        assert!(!is_required(&Value::from("   ")));
        assert!(!is_required(&Value::Array(vec![])));
        assert!(is_required(&Value::from(0)));
        assert!(is_required(&Value::from(false)));
        assert!(is_required(&Value::from("x")));
    }

    #[test]
    fn required_on_absent_field_fails() {
        assert!(!last(json!({}), &[("name", "required")], "name"));
    }

    #[test]
    fn present_checks_the_key_only() {
        assert!(last(json!({ "name": "" }), &[("name", "present")], "name"));
        assert!(last(json!({ "name": null }), &[("name", "present")], "name"));
        assert!(!last(json!({}), &[("name", "present")], "name"));
    }

    #[test]
    fn filled_allows_absent_but_not_empty() {
        assert!(last(json!({}), &[("name", "filled")], "name"));
        assert!(!last(json!({ "name": "" }), &[("name", "filled")], "name"));
        assert!(last(json!({ "name": "a" }), &[("name", "filled")], "name"));
    }

    #[test]
    fn accepted_values() {
        for value in [json!("yes"), json!("on"), json!("1"), json!("true"), json!(1), json!(true)] {
            assert!(last(json!({ "tos": value }), &[("tos", "accepted")], "tos"), "{value}");
        }
        for value in [json!("no"), json!(0), json!(false), json!(""), json!(null)] {
            assert!(!last(json!({ "tos": value }), &[("tos", "accepted")], "tos"), "{value}");
        }
    }

    #[test]
    fn required_with_family() {
        let rules = [("b", "required_with:a")];
        assert!(last(json!({}), &rules, "b"));
        assert!(!last(json!({ "a": "x" }), &rules, "b"));
        assert!(last(json!({ "a": "x", "b": "y" }), &rules, "b"));

        let rules = [("c", "required_with_all:a,b")];
        assert!(last(json!({ "a": "x" }), &rules, "c"));
        assert!(!last(json!({ "a": "x", "b": "y" }), &rules, "c"));

        let rules = [("c", "required_without:a,b")];
        assert!(!last(json!({ "a": "x" }), &rules, "c"));
        assert!(last(json!({ "a": "x", "b": "y" }), &rules, "c"));

        let rules = [("c", "required_without_all:a,b")];
        assert!(last(json!({ "a": "x" }), &rules, "c"));
        assert!(!last(json!({}), &rules, "c"));
    }

    #[test]
    fn required_if_compares_other_field() {
        let rules = [("bar", "required_if:foo,yes,true")];
        assert!(!last(json!({ "foo": "yes" }), &rules, "bar"));
        assert!(!last(json!({ "foo": true }), &rules, "bar"));
        assert!(last(json!({ "foo": "no" }), &rules, "bar"));
        assert!(last(json!({ "foo": "yes", "bar": "x" }), &rules, "bar"));
    }

    #[test]
    fn required_if_with_numbers() {
        let rules = [("bar", "required_if:color,1")];
        assert!(!last(json!({ "color": 1 }), &rules, "bar"));
        assert!(!last(json!({ "color": "1" }), &rules, "bar"));
        assert!(last(json!({ "color": 2 }), &rules, "bar"));
    }

    #[test]
    fn required_unless_is_the_inverse() {
        let rules = [("bar", "required_unless:foo,skip")];
        assert!(last(json!({ "foo": "skip" }), &rules, "bar"));
        assert!(!last(json!({ "foo": "other" }), &rules, "bar"));
        assert!(!last(json!({}), &rules, "bar"));
    }

    #[test]
    fn conditional_rules_need_parameters() {
        for rule in [
            "required_with",
            "required_with_all",
            "required_without",
            "required_without_all",
            "required_if:foo",
            "required_unless:foo",
        ] {
            let result = try_run(json!({}), &[("bar", rule)], "bar");
            assert!(
                matches!(result, Err(ConfigError::MissingParameters { .. })),
                "{rule}"
            );
        }
    }
}
