//! Rules comparing a value with another field or a parameter list.

use super::presence::scalar_text;
use super::{require_params, RuleContext};
use crate::error::Result;
use crate::rule::Rule;
use crate::value::Value;

fn matches_field(ctx: &RuleContext<'_>, other: &str, value: &Value) -> bool {
    ctx.field_value(other).map_or(false, |other| other == value)
}

/// Equal to the named field, which must exist.
pub(super) fn same(ctx: &RuleContext<'_>, _: &str, value: &Value, params: &[String]) -> Result<bool> {
    require_params(1, params, "same")?;
    Ok(matches_field(ctx, &params[0], value))
}

/// Different from the named field, which must exist.
pub(super) fn different(
    ctx: &RuleContext<'_>,
    _: &str,
    value: &Value,
    params: &[String],
) -> Result<bool> {
    require_params(1, params, "different")?;
    Ok(ctx
        .field_value(&params[0])
        .map_or(false, |other| other != value))
}

/// Equal to `<field>_confirmation`.
pub(super) fn confirmed(
    ctx: &RuleContext<'_>,
    field: &str,
    value: &Value,
    _: &[String],
) -> Result<bool> {
    Ok(matches_field(ctx, &format!("{field}_confirmation"), value))
}

fn listed(value: &Value, params: &[String]) -> bool {
    scalar_text(value).map_or(false, |text| params.iter().any(|p| *p == text))
}

/// Scalars must be listed. On an `array` field every element must be.
fn contained(ctx: &RuleContext<'_>, field: &str, value: &Value, params: &[String]) -> bool {
    match value {
        Value::Array(items) if ctx.has_rule(field, &[Rule::Array]) => {
            items.iter().all(|item| listed(item, params))
        }
        other => listed(other, params),
    }
}

pub(super) fn in_list(
    ctx: &RuleContext<'_>,
    field: &str,
    value: &Value,
    params: &[String],
) -> Result<bool> {
    require_params(1, params, "in")?;
    Ok(contained(ctx, field, value, params))
}

pub(super) fn not_in_list(
    ctx: &RuleContext<'_>,
    field: &str,
    value: &Value,
    params: &[String],
) -> Result<bool> {
    require_params(1, params, "not_in")?;
    Ok(!contained(ctx, field, value, params))
}
