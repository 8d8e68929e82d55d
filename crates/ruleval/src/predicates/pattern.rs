//! Format rules backed by regular expressions, plus `ip`.

use super::{require_params, RuleContext};
use crate::error::{ConfigError, Result};
use crate::value::Value;
use regex::Regex;
use std::sync::OnceLock;

static NUMERIC_REGEX: OnceLock<Regex> = OnceLock::new();
static INTEGER_REGEX: OnceLock<Regex> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static ALPHA_REGEX: OnceLock<Regex> = OnceLock::new();
static ALPHA_NUM_REGEX: OnceLock<Regex> = OnceLock::new();
static ALPHA_DASH_REGEX: OnceLock<Regex> = OnceLock::new();

fn numeric_regex() -> &'static Regex {
    NUMERIC_REGEX.get_or_init(|| Regex::new(r"^-?[0-9]+(\.[0-9]*)?$").unwrap())
}

fn integer_regex() -> &'static Regex {
    INTEGER_REGEX.get_or_init(|| Regex::new(r"^-?[0-9]+$").unwrap())
}

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,8}$").unwrap()
    })
}

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| Regex::new(r"(?i)^(https?|ftp)://[^\s/$.?#].[^\s]*$").unwrap())
}

fn alpha_regex() -> &'static Regex {
    ALPHA_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z]+$").unwrap())
}

fn alpha_num_regex() -> &'static Regex {
    ALPHA_NUM_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap())
}

fn alpha_dash_regex() -> &'static Regex {
    ALPHA_DASH_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap())
}

/// Whether the value's string form is a decimal number. Shared with the
/// `digits` rules.
pub(super) fn is_numeric(value: &Value) -> bool {
    numeric_regex().is_match(&value.to_text())
}

pub(super) fn numeric(_: &RuleContext<'_>, _: &str, value: &Value, _: &[String]) -> Result<bool> {
    Ok(is_numeric(value))
}

pub(super) fn integer(_: &RuleContext<'_>, _: &str, value: &Value, _: &[String]) -> Result<bool> {
    Ok(integer_regex().is_match(&value.to_text()))
}

pub(super) fn email(_: &RuleContext<'_>, _: &str, value: &Value, _: &[String]) -> Result<bool> {
    Ok(email_regex().is_match(&value.to_text()))
}

pub(super) fn url(_: &RuleContext<'_>, _: &str, value: &Value, _: &[String]) -> Result<bool> {
    Ok(url_regex().is_match(&value.to_text()))
}

pub(super) fn alpha(_: &RuleContext<'_>, _: &str, value: &Value, _: &[String]) -> Result<bool> {
    Ok(alpha_regex().is_match(&value.to_text()))
}

pub(super) fn alpha_num(_: &RuleContext<'_>, _: &str, value: &Value, _: &[String]) -> Result<bool> {
    Ok(alpha_num_regex().is_match(&value.to_text()))
}

pub(super) fn alpha_dash(_: &RuleContext<'_>, _: &str, value: &Value, _: &[String]) -> Result<bool> {
    Ok(alpha_dash_regex().is_match(&value.to_text()))
}

/// `regex:/pattern/flags` or `regex:pattern`. Arrays pass when any element
/// matches.
pub(super) fn regex(_: &RuleContext<'_>, _: &str, value: &Value, params: &[String]) -> Result<bool> {
    require_params(1, params, "regex")?;
    let pattern = compile_pattern(&params[0])?;

    Ok(match value {
        Value::Array(items) => items.iter().any(|item| pattern.is_match(&item.to_text())),
        other => pattern.is_match(&other.to_text()),
    })
}

/// Compile a rule parameter into a [`Regex`].
///
/// A parameter wrapped in slashes has its trailing flags translated to
/// inline flags: `i`, `m`, `s` and `x` carry over, `g`, `u` and `y` have no
/// meaning for a single match and are dropped.
pub(crate) fn compile_pattern(param: &str) -> Result<Regex> {
    let (body, flags) = match param.strip_prefix('/').and_then(|rest| rest.rsplit_once('/')) {
        Some((body, flags)) => (body, flags),
        None => (param, ""),
    };

    let inline: String = flags
        .chars()
        .filter(|flag| matches!(flag, 'i' | 'm' | 's' | 'x'))
        .collect();
    let source = if inline.is_empty() {
        body.to_string()
    } else {
        format!("(?{inline}){body}")
    };

    Regex::new(&source).map_err(|err| ConfigError::InvalidPattern {
        pattern: param.to_string(),
        reason: err.to_string(),
    })
}

/// Dotted IPv4: four decimal octets, the outer two in 1..=255.
pub(super) fn ip(_: &RuleContext<'_>, _: &str, value: &Value, _: &[String]) -> Result<bool> {
    const BOUNDS: [(u16, u16); 4] = [(1, 255), (0, 255), (0, 255), (1, 255)];

    let text = value.to_text();
    let octets: Vec<&str> = text.split('.').collect();
    if octets.len() != BOUNDS.len() {
        return Ok(false);
    }

    Ok(octets
        .iter()
        .zip(BOUNDS)
        .all(|(octet, (low, high))| octet_in_range(octet, low, high)))
}

fn octet_in_range(octet: &str, low: u16, high: u16) -> bool {
    (1..=3).contains(&octet.len())
        && octet.bytes().all(|b| b.is_ascii_digit())
        && octet
            .parse::<u16>()
            .map_or(false, |n| (low..=high).contains(&n))
}
