//! Error types for the job worth calculator.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only two kinds of failure reach a user: a [`ValidationError`] raised when
//! the form is submitted, and an [`ExportError`] raised by the share-image
//! pipeline. Configuration problems are reported through [`WorthError`].

use serde::Serialize;
use thiserror::Error;

use crate::models::NumericField;

/// The single combined message shown when any numeric field fails validation.
pub const VALIDATION_MESSAGE: &str =
    "请确保薪酬、工作、通勤和摸鱼时长是有效的正数（通勤和摸鱼可为0）。";

/// Why a numeric field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// The field was left empty.
    Missing,
    /// The text could not be read as a decimal number.
    NotANumber,
    /// The value must be strictly greater than zero.
    NotPositive,
    /// The value must not be below zero.
    Negative,
    /// A well-formed number larger than the calculator can represent.
    OutOfRange,
}

impl IssueKind {
    /// A short English description of the issue.
    pub fn describe(&self) -> &'static str {
        match self {
            IssueKind::Missing => "is required",
            IssueKind::NotANumber => "is not a number",
            IssueKind::NotPositive => "must be greater than 0",
            IssueKind::Negative => "must not be negative",
            IssueKind::OutOfRange => "is too large (max 79228162514264337593543950335)",
        }
    }
}

/// A single rejected field, with the raw text that was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// The field that failed.
    pub field: NumericField,
    /// Why it failed.
    pub kind: IssueKind,
    /// The text as submitted.
    pub raw: String,
}

/// One or more required numeric fields were missing, unparseable or out of range.
///
/// Displays as one combined message regardless of how many fields failed;
/// the individual problems are available through [`ValidationError::issues`].
///
/// # Example
///
/// ```
/// use job_worth::error::{FieldIssue, IssueKind, ValidationError, VALIDATION_MESSAGE};
/// use job_worth::models::NumericField;
///
/// let error = ValidationError::new(vec![FieldIssue {
///     field: NumericField::DailySalary,
///     kind: IssueKind::NotPositive,
///     raw: "0".to_string(),
/// }]);
/// assert_eq!(error.to_string(), VALIDATION_MESSAGE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{}", VALIDATION_MESSAGE)]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Creates a validation error from the collected field issues.
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    /// The individual field problems, in form order.
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Returns true if the given field is among the rejected ones.
    pub fn has_issue(&self, field: NumericField) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }

    /// A per-field breakdown, one line per issue.
    pub fn details(&self) -> String {
        self.issues
            .iter()
            .map(|issue| format!("{} {} (got '{}')", issue.field, issue.kind.describe(), issue.raw))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A factor selection did not match any of the allowed choices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} value '{value}', expected one of: {expected}")]
pub struct UnknownFactor {
    /// Which factor was being parsed.
    pub kind: &'static str,
    /// The rejected text.
    pub value: String,
    /// The accepted keys and weights.
    pub expected: String,
}

/// Failures anywhere in the render, composite, encode or deliver stages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// There is no result on screen to export.
    #[error("No calculation result to export")]
    MissingResult,

    /// Another export is still in flight.
    #[error("An export is already in progress")]
    Busy,

    /// The result region could not be rendered.
    #[error("Failed to capture result region: {message}")]
    Capture {
        /// A description of the capture failure.
        message: String,
    },

    /// The overlay canvas could not be produced.
    #[error("Failed to composite share image: {message}")]
    Composite {
        /// A description of the composite failure.
        message: String,
    },

    /// The composited image could not be encoded.
    #[error("Failed to encode share image: {message}")]
    Encode {
        /// A description of the encoding failure.
        message: String,
    },

    /// Neither the share target nor the download fallback succeeded.
    #[error("Failed to deliver share image: {message}")]
    Delivery {
        /// A description of the delivery failure.
        message: String,
    },
}

impl ExportError {
    /// The alert text shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExportError::MissingResult => "无法生成分享图片，请稍后再试。",
            ExportError::Busy => "生成中...",
            _ => "生成分享图片时出错，请稍后再试。",
        }
    }
}

/// The crate-level error type.
#[derive(Debug, Error)]
pub enum WorthError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A submitted form failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A factor selection was not one of the allowed choices.
    #[error(transparent)]
    UnknownFactor(#[from] UnknownFactor),

    /// The share-image export failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// A type alias for Results that return WorthError.
pub type WorthResult<T> = Result<T, WorthError>;
