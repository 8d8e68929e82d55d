//! Date rules and the date parser they share with message formatting.

use super::{require_params, RuleContext};
use crate::error::Result;
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::cmp::Ordering;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

/// Interpret a value as an instant.
///
/// Dates are taken as is, numbers as milliseconds since the Unix epoch and
/// strings are tried against RFC 3339, RFC 2822 and a set of common layouts.
/// Zone-less strings are read as UTC. Numeric strings are never epochs.
pub(crate) fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Date(date) => Some(*date),
        Value::Number(ms) if ms.is_finite() => Utc.timestamp_millis_opt(*ms as i64).single(),
        Value::String(s) => parse_date_str(s),
        _ => None,
    }
}

fn parse_date_str(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(text) {
        return Some(date.with_timezone(&Utc));
    }
    if let Some(naive) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    {
        return midnight(date);
    }

    // Partial dates: "2024-03" and "2024".
    if let Some((year, month)) = text.split_once('-') {
        if year.len() == 4 && (1..=2).contains(&month.len()) {
            let year = year.parse().ok()?;
            let month = month.parse().ok()?;
            return midnight(NaiveDate::from_ymd_opt(year, month, 1)?);
        }
    }
    if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) {
        return midnight(NaiveDate::from_ymd_opt(text.parse().ok()?, 1, 1)?);
    }

    None
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

fn is_date_like(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Date(_))
}

/// A date parameter names another field when that key exists, otherwise it
/// is a literal date.
fn resolve_target(ctx: &RuleContext<'_>, param: &str) -> Option<DateTime<Utc>> {
    match ctx.field_value(param) {
        Some(other) if is_date_like(other) => parse_date(other),
        Some(_) => None,
        None => parse_date_str(param),
    }
}

fn compare(
    ctx: &RuleContext<'_>,
    value: &Value,
    params: &[String],
    rule: &str,
    accept: fn(Ordering) -> bool,
) -> Result<bool> {
    require_params(1, params, rule)?;
    if !is_date_like(value) {
        return Ok(false);
    }
    Ok(match (parse_date(value), resolve_target(ctx, &params[0])) {
        (Some(date), Some(target)) => accept(date.cmp(&target)),
        _ => false,
    })
}

pub(super) fn date(_: &RuleContext<'_>, _: &str, value: &Value, _: &[String]) -> Result<bool> {
    Ok(is_date_like(value) && parse_date(value).is_some())
}

pub(super) fn before(ctx: &RuleContext<'_>, _: &str, value: &Value, params: &[String]) -> Result<bool> {
    compare(ctx, value, params, "before", Ordering::is_lt)
}

pub(super) fn before_or_equal(
    ctx: &RuleContext<'_>,
    _: &str,
    value: &Value,
    params: &[String],
) -> Result<bool> {
    compare(ctx, value, params, "before_or_equal", Ordering::is_le)
}

pub(super) fn after(ctx: &RuleContext<'_>, _: &str, value: &Value, params: &[String]) -> Result<bool> {
    compare(ctx, value, params, "after", Ordering::is_gt)
}

pub(super) fn after_or_equal(
    ctx: &RuleContext<'_>,
    _: &str,
    value: &Value,
    params: &[String],
) -> Result<bool> {
    compare(ctx, value, params, "after_or_equal", Ordering::is_ge)
}

/// `date_between:start,end`, both bounds inclusive.
pub(super) fn date_between(
    ctx: &RuleContext<'_>,
    _: &str,
    value: &Value,
    params: &[String],
) -> Result<bool> {
    require_params(2, params, "date_between")?;
    if !is_date_like(value) {
        return Ok(false);
    }
    let bounds = (
        parse_date(value),
        resolve_target(ctx, &params[0]),
        resolve_target(ctx, &params[1]),
    );
    Ok(match bounds {
        (Some(date), Some(start), Some(end)) => start <= date && date <= end,
        _ => false,
    })
}
