//! Submit-time validation of the numeric fields.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FieldIssue, IssueKind, ValidationError};
use crate::models::{CalculationInput, FactorSelection, NumericField};

/// Raw text of the four numeric fields, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawNumericInput {
    /// Average daily salary text.
    pub daily_salary: String,
    /// Work hours text.
    pub work_hours: String,
    /// Commute hours text.
    pub commute_hours: String,
    /// Slacking hours text.
    pub slacking_hours: String,
}

impl RawNumericInput {
    /// The raw text for a field.
    pub fn get(&self, field: NumericField) -> &str {
        match field {
            NumericField::DailySalary => &self.daily_salary,
            NumericField::WorkHours => &self.work_hours,
            NumericField::CommuteHours => &self.commute_hours,
            NumericField::SlackingHours => &self.slacking_hours,
        }
    }
}

/// Parses decimal text, accepting the partial forms the mask allows.
///
/// `5.` reads as 5 and `.5` as 0.5. A lone `.`, empty text, exponents and
/// anything else that is not plain decimal notation yield `None`, as do
/// well-formed numbers beyond [`Decimal::MAX`].
///
/// ```
/// use job_worth::validation::parse_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_decimal(".5"), Some(Decimal::new(5, 1)));
/// assert_eq!(parse_decimal("8."), Some(Decimal::from(8)));
/// assert_eq!(parse_decimal("."), None);
/// ```
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    read_decimal(text).ok()
}

/// Like [`parse_decimal`], but says why the text was rejected: malformed
/// text is [`IssueKind::NotANumber`], a well-formed number too large for a
/// `Decimal` is [`IssueKind::OutOfRange`].
fn read_decimal(text: &str) -> Result<Decimal, IssueKind> {
    let trimmed = text.trim();
    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let body = body.strip_suffix('.').unwrap_or(body);
    let well_formed = body.chars().any(|c| c.is_ascii_digit())
        && body.chars().all(|c| c.is_ascii_digit() || c == '.')
        && body.matches('.').count() <= 1;
    if !well_formed {
        return Err(IssueKind::NotANumber);
    }

    let body = if body.starts_with('.') {
        format!("0{}", body)
    } else {
        body.to_string()
    };

    Decimal::from_str(&format!("{}{}", sign, body)).map_err(|_| IssueKind::OutOfRange)
}

/// Validates one numeric field.
pub fn validate_field(field: NumericField, raw: &str) -> Result<Decimal, FieldIssue> {
    let issue = |kind| FieldIssue {
        field,
        kind,
        raw: raw.to_string(),
    };

    if raw.trim().is_empty() {
        return Err(issue(IssueKind::Missing));
    }

    let value = read_decimal(raw).map_err(issue)?;

    if value < Decimal::ZERO {
        return Err(issue(if field.allows_zero() {
            IssueKind::Negative
        } else {
            IssueKind::NotPositive
        }));
    }
    if value.is_zero() && !field.allows_zero() {
        return Err(issue(IssueKind::NotPositive));
    }

    Ok(value)
}

/// Validates the raw form values and builds a [`CalculationInput`].
///
/// Every field is checked, so the returned error lists all problems at once.
///
/// # Examples
///
/// ```
/// use job_worth::models::FactorSelection;
/// use job_worth::validation::{validate, RawNumericInput};
///
/// let raw = RawNumericInput {
///     daily_salary: "300".to_string(),
///     work_hours: "8".to_string(),
///     commute_hours: "0".to_string(),
///     slacking_hours: "0".to_string(),
/// };
/// assert!(validate(&raw, "", FactorSelection::default()).is_ok());
///
/// let raw = RawNumericInput { daily_salary: "0".to_string(), ..raw };
/// assert!(validate(&raw, "", FactorSelection::default()).is_err());
/// ```
pub fn validate(
    raw: &RawNumericInput,
    name: &str,
    factors: FactorSelection,
) -> Result<CalculationInput, ValidationError> {
    let mut values = [Decimal::ZERO; 4];
    let mut issues = Vec::new();

    for (slot, field) in values.iter_mut().zip(NumericField::ALL) {
        match validate_field(field, raw.get(field)) {
            Ok(value) => *slot = value,
            Err(issue) => issues.push(issue),
        }
    }

    if !issues.is_empty() {
        debug!(issue_count = issues.len(), "Form validation failed");
        return Err(ValidationError::new(issues));
    }

    let [daily_salary, work_hours, commute_hours, slacking_hours] = values;
    Ok(CalculationInput {
        name: name.to_string(),
        daily_salary,
        work_hours,
        commute_hours,
        slacking_hours,
        factors,
    })
}
