//! Size comparisons (`size`, `between`, `min`, `max`) and digit counts.

use super::pattern::is_numeric;
use super::{require_params, RuleContext};
use crate::error::Result;
use crate::rule::NUMERIC_RULES;
use crate::value::{parse_number, Value};

/// Measure a value for the size rules.
///
/// Falsy values measure 0. A field that also carries `numeric` or `integer`
/// measures by its leading number; otherwise strings measure their character
/// count and arrays their length. Anything else has no size.
pub(crate) fn measure(ctx: &RuleContext<'_>, field: &str, value: &Value) -> Option<f64> {
    if value.is_falsy() {
        return Some(0.0);
    }
    if ctx.has_rule(field, NUMERIC_RULES) {
        if let Some(number) = value.leading_number() {
            return Some(number);
        }
    }
    match value {
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        _ => None,
    }
}

fn param(params: &[String], index: usize) -> Option<f64> {
    params.get(index).and_then(|p| parse_number(p))
}

pub(super) fn size(ctx: &RuleContext<'_>, field: &str, value: &Value, params: &[String]) -> Result<bool> {
    require_params(1, params, "size")?;
    Ok(match (measure(ctx, field, value), param(params, 0)) {
        (Some(size), Some(expected)) => size == expected,
        _ => false,
    })
}

pub(super) fn between(
    ctx: &RuleContext<'_>,
    field: &str,
    value: &Value,
    params: &[String],
) -> Result<bool> {
    require_params(2, params, "between")?;
    Ok(
        match (measure(ctx, field, value), param(params, 0), param(params, 1)) {
            (Some(size), Some(min), Some(max)) => min <= size && size <= max,
            _ => false,
        },
    )
}

pub(super) fn min(ctx: &RuleContext<'_>, field: &str, value: &Value, params: &[String]) -> Result<bool> {
    require_params(1, params, "min")?;
    Ok(match (measure(ctx, field, value), param(params, 0)) {
        (Some(size), Some(min)) => size >= min,
        _ => false,
    })
}

pub(super) fn max(ctx: &RuleContext<'_>, field: &str, value: &Value, params: &[String]) -> Result<bool> {
    require_params(1, params, "max")?;
    Ok(match (measure(ctx, field, value), param(params, 0)) {
        (Some(size), Some(max)) => size <= max,
        _ => false,
    })
}

fn digit_count(value: &Value) -> Option<f64> {
    is_numeric(value).then(|| value.to_text().chars().count() as f64)
}

/// Numeric with exactly N characters.
pub(super) fn digits(_: &RuleContext<'_>, _: &str, value: &Value, params: &[String]) -> Result<bool> {
    require_params(1, params, "digits")?;
    Ok(match (digit_count(value), param(params, 0)) {
        (Some(count), Some(expected)) => count == expected,
        _ => false,
    })
}

pub(super) fn digits_between(
    _: &RuleContext<'_>,
    _: &str,
    value: &Value,
    params: &[String],
) -> Result<bool> {
    require_params(2, params, "digits_between")?;
    Ok(
        match (digit_count(value), param(params, 0), param(params, 1)) {
            (Some(count), Some(min), Some(max)) => min <= count && count <= max,
            _ => false,
        },
    )
}
