//! Raw form text to typed field values.
//!
//! Every function here is pure. Values that cannot be parsed are kept as
//! [`Parsed::Invalid`] so the validator can report them; nothing is silently
//! coerced. Zero-defaulting of absent numbers happens at submission, not here.

use chrono::NaiveDate;

use crate::model::Priority;

/// A field that was supplied but may not have parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed<T> {
    /// The input parsed cleanly.
    Value(T),
    /// The raw input, kept for the violation message.
    Invalid(String),
}

impl<T> Parsed<T> {
    /// The parsed value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Invalid(_) => None,
        }
    }
}

/// Raw text exactly as typed into the task form. Empty means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct RawTaskInput {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub due_date: String,
    pub tags: String,
    pub estimated_time: String,
    pub actual_time_spent: String,
    pub completed: String,
    pub list_id: String,
}

/// A task record after normalization, before validation.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct TaskCandidate {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Parsed<Priority>>,
    pub due_date: Option<Parsed<NaiveDate>>,
    pub tags: Vec<String>,
    pub completed: Option<Parsed<bool>>,
    pub estimated_time: Option<Parsed<f64>>,
    pub actual_time_spent: Option<Parsed<f64>>,
    pub list_id: Option<i64>,
}

/// Normalizes every field of a raw form.
#[must_use]
pub fn normalize(raw: &RawTaskInput) -> TaskCandidate {
    TaskCandidate {
        title: raw.title.clone(),
        description: non_empty(&raw.description).map(str::to_string),
        priority: parse_priority(&raw.priority),
        due_date: parse_due_date(&raw.due_date),
        tags: parse_tags(&raw.tags),
        completed: parse_flag(&raw.completed),
        estimated_time: parse_number(&raw.estimated_time),
        actual_time_spent: parse_number(&raw.actual_time_spent),
        list_id: parse_list_id(&raw.list_id),
    }
}

/// Parses a decimal number. NaN and infinities count as unparseable.
#[must_use]
pub fn parse_number(raw: &str) -> Option<Parsed<f64>> {
    let trimmed = non_empty(raw)?;
    Some(match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Parsed::Value(n),
        _ => Parsed::Invalid(trimmed.to_string()),
    })
}

/// Splits on `,`, trims each segment and drops the empty ones.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty()).map(str::to_string).collect()
}

/// Parses a `YYYY-MM-DD` date.
#[must_use]
pub fn parse_due_date(raw: &str) -> Option<Parsed<NaiveDate>> {
    let trimmed = non_empty(raw)?;
    Some(match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Parsed::Value(date),
        Err(_) => Parsed::Invalid(trimmed.to_string()),
    })
}

/// Passes one of `low`, `medium`, `high` through.
#[must_use]
pub fn parse_priority(raw: &str) -> Option<Parsed<Priority>> {
    let trimmed = non_empty(raw)?;
    Some(match Priority::parse(trimmed) {
        Some(p) => Parsed::Value(p),
        None => Parsed::Invalid(trimmed.to_string()),
    })
}

/// Parses a checkbox value: `true`/`false`, `yes`/`no`, `1`/`0`.
#[must_use]
pub fn parse_flag(raw: &str) -> Option<Parsed<bool>> {
    let trimmed = non_empty(raw)?;
    Some(match trimmed.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Parsed::Value(true),
        "false" | "no" | "0" => Parsed::Value(false),
        _ => Parsed::Invalid(trimmed.to_string()),
    })
}

/// Parses a list reference. Anything that is not an integer reads as absent.
#[must_use]
pub fn parse_list_id(raw: &str) -> Option<i64> {
    non_empty(raw)?.parse().ok()
}

fn non_empty(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
