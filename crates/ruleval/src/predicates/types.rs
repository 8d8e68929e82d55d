//! Type rules. All of them pass when the field is absent.

use super::RuleContext;
use crate::error::Result;
use crate::value::Value;

pub(super) fn array(ctx: &RuleContext<'_>, field: &str, value: &Value, _: &[String]) -> Result<bool> {
    Ok(!ctx.has_data(field) || matches!(value, Value::Null | Value::Array(_)))
}

pub(super) fn string(ctx: &RuleContext<'_>, field: &str, value: &Value, _: &[String]) -> Result<bool> {
    Ok(!ctx.has_data(field) || matches!(value, Value::Null | Value::String(_)))
}

/// `true`, `false`, `0`, `1`, `"0"`, `"1"` or null.
pub(super) fn boolean(ctx: &RuleContext<'_>, field: &str, value: &Value, _: &[String]) -> Result<bool> {
    if !ctx.has_data(field) {
        return Ok(true);
    }
    let accepted = match value {
        Value::Null | Value::Bool(_) => true,
        Value::Number(n) => *n == 0.0 || *n == 1.0,
        Value::String(s) => s == "0" || s == "1",
        _ => false,
    };
    Ok(accepted)
}

/// Strings must parse as JSON; scalars already are JSON.
pub(super) fn json(_: &RuleContext<'_>, _: &str, value: &Value, _: &[String]) -> Result<bool> {
    let valid = match value {
        Value::String(s) => serde_json::from_str::<serde_json::Value>(s).is_ok(),
        Value::Null | Value::Bool(_) | Value::Number(_) => true,
        _ => false,
    };
    Ok(valid)
}
