//! Request body parsing and field rules.

use crate::error::AppError;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::OnceLock;

/// Field-level rules a request body must satisfy after it deserializes.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

/// Deserialize a JSON body (unknown fields are rejected by the target type) and validate it.
pub fn parse_body<T>(body: Value) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate,
{
    if !body.is_object() {
        return Err(AppError::InvalidRequest("body must be a JSON object".into()));
    }
    let parsed: T = serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;
    parsed.validate()?;
    Ok(parsed)
}

pub fn length(field: &str, v: &str, min: usize, max: Option<usize>) -> Result<(), AppError> {
    let n = v.chars().count();
    if n < min {
        return Err(AppError::Validation(format!(
            "{} must be at least {} characters",
            field, min
        )));
    }
    if let Some(max) = max {
        if n > max {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                field, max
            )));
        }
    }
    Ok(())
}

pub fn minimum(field: &str, n: i32, min: i32) -> Result<(), AppError> {
    if n < min {
        return Err(AppError::Validation(format!("{} must be at least {}", field, min)));
    }
    Ok(())
}

pub fn email(field: &str, v: &str) -> Result<(), AppError> {
    matches(field, v, email_re(), "a valid email")
}

pub fn url(field: &str, v: &str) -> Result<(), AppError> {
    matches(field, v, url_re(), "a valid URL")
}

/// Decimal in [0, 1]: `0`, `0.5`, `.25`, `1`, `1.0`.
pub fn equity(field: &str, v: &str) -> Result<(), AppError> {
    matches(field, v, equity_re(), "a decimal between 0 and 1")
}

fn matches(field: &str, v: &str, re: Option<&Regex>, what: &str) -> Result<(), AppError> {
    let re = re.ok_or_else(|| AppError::Internal(format!("pattern for {} failed to compile", field)))?;
    if !re.is_match(v) {
        return Err(AppError::Validation(format!("{} must be {}", field, what)));
    }
    Ok(())
}

fn email_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok()).as_ref()
}

fn url_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https?://[^\s/?#]+[^\s]*$").ok()).as_ref()
}

fn equity_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(0|0?\.[0-9]+|1(\.0+)?)$").ok()).as_ref()
}
