// ABOUTME: Declarative field rule sets and the evaluator that runs them on submit
// Produces one human-readable message per invalid field

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

use super::step::{ChoiceOption, FieldId};

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$")
            .unwrap();
}

/// Raw field values as entered, keyed by field
pub type FormValues = HashMap<FieldId, String>;

/// A single constraint on a field. Each carries the message shown when it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Value must be non-empty after trimming
    Required(&'static str),
    /// Value must look like an email address
    Email(&'static str),
    /// Value must parse as a number
    Number(&'static str),
    /// Numeric value must be greater than zero
    Positive(&'static str),
    /// Numeric value must have no fractional part
    Integer(&'static str),
    /// Numeric value must not exceed the bound
    AtMost(u32, &'static str),
    /// Value must be one of the listed option values
    OneOf(&'static [ChoiceOption], &'static str),
}

impl Check {
    /// Returns the failure message if `value` violates this check
    fn evaluate(&self, value: &str) -> Option<&'static str> {
        let value = value.trim();
        match *self {
            Self::Required(msg) => value.is_empty().then_some(msg),
            Self::Email(msg) => (!EMAIL_RE.is_match(value)).then_some(msg),
            Self::Number(msg) => value.parse::<f64>().map_or(true, |n| !n.is_finite()).then_some(msg),
            Self::Positive(msg) => value.parse::<f64>().map_or(true, |n| n <= 0.0).then_some(msg),
            Self::Integer(msg) => value.parse::<f64>().map_or(true, |n| n.fract() != 0.0).then_some(msg),
            Self::AtMost(max, msg) => value.parse::<f64>().map_or(true, |n| n > f64::from(max)).then_some(msg),
            Self::OneOf(options, msg) => (!options.iter().any(|o| o.value == value)).then_some(msg),
        }
    }
}

/// Ordered checks for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub field: FieldId,
    pub checks: Vec<Check>,
}

impl FieldRule {
    pub fn new(field: FieldId) -> Self {
        Self { field, checks: Vec::new() }
    }

    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// First failing check wins; later checks assume the earlier ones passed
    fn first_failure(&self, value: &str) -> Option<&'static str> {
        self.checks.iter().find_map(|c| c.evaluate(value))
    }
}

/// A step's full rule set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    rules: Vec<FieldRule>,
}

impl Schema {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Evaluate every rule against `values`. Missing values are treated as empty.
    pub fn validate(&self, values: &FormValues) -> Result<(), ValidationErrors> {
        let errors: Vec<FieldError> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let value = values.get(&rule.field).map(String::as_str).unwrap_or("");
                rule.first_failure(value).map(|message| FieldError::new(rule.field, message))
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

/// Field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: FieldId,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FieldId, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

/// All failures from one submit attempt, in rule order
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn message_for(&self, field: FieldId) -> Option<&str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> Vec<FieldId> {
        self.0.iter().map(|e| e.field).collect()
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}
