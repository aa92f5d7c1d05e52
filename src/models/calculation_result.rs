//! Calculation result models.
//!
//! This module contains the [`CalculationResult`] type and its associated
//! structures: the [`Score`] outcome and an audit trace recording each step
//! of the formula.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CalculationInput, Tier};

/// The symbolic score returned when effective hours are zero or negative.
pub const SENTINEL_SCORE: Decimal = Decimal::from_parts(99999, 0, 0, false, 0);

/// Headline shown instead of a number for the sentinel score.
pub const SENTINEL_DISPLAY: &str = "摸鱼™爽翻天";

/// Verdict title for the sentinel score.
pub const SENTINEL_TITLE: &str = "摸鱼之神 🏆";

/// Verdict message for the sentinel score.
pub const SENTINEL_MESSAGE: &str = "有效工时为负或零？你是懂时间管理的！摸鱼界的传奇！";

/// The outcome of a successful calculation.
///
/// # Example
///
/// ```
/// use job_worth::models::{Score, Tier};
/// use rust_decimal::Decimal;
///
/// let score = Score::Value { value: Decimal::new(3529, 2), tier: Tier::Endure };
/// assert_eq!(score.display(), "35.29");
/// assert_eq!(Score::Sentinel.numeric(), Decimal::from(99999));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Score {
    /// Slacking outweighs working: effective hours were not positive.
    Sentinel,
    /// A numeric score and the tier it falls into.
    Value {
        /// The cost-performance index.
        value: Decimal,
        /// The band containing `value`.
        tier: Tier,
    },
}

impl Score {
    /// The numeric value, with the sentinel reported as 99999.
    pub fn numeric(&self) -> Decimal {
        match self {
            Score::Sentinel => SENTINEL_SCORE,
            Score::Value { value, .. } => *value,
        }
    }

    /// Returns true for the sentinel outcome.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Score::Sentinel)
    }

    /// The tier, if the score is numeric.
    pub fn tier(&self) -> Option<Tier> {
        match self {
            Score::Sentinel => None,
            Score::Value { tier, .. } => Some(*tier),
        }
    }

    /// The headline text: the score to two decimals, or the sentinel slogan.
    pub fn display(&self) -> String {
        match self {
            Score::Sentinel => SENTINEL_DISPLAY.to_string(),
            Score::Value { value, .. } => format_two_places(*value),
        }
    }

    /// The score to two decimal places, sentinel included.
    pub fn two_places(&self) -> String {
        format_two_places(self.numeric())
    }

    /// The verdict headline.
    pub fn title(&self) -> &'static str {
        match self {
            Score::Sentinel => SENTINEL_TITLE,
            Score::Value { tier, .. } => tier.title(),
        }
    }

    /// The verdict message.
    pub fn message(&self) -> &'static str {
        match self {
            Score::Sentinel => SENTINEL_MESSAGE,
            Score::Value { tier, .. } => tier.message(),
        }
    }
}

fn format_two_places(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Finds a step by its rule id.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }
}

/// The complete result of one submission.
///
/// Each submission produces a fresh result with its own id; results are
/// never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the calculator that produced the result.
    pub engine_version: String,
    /// The validated input the score was computed from.
    pub input: CalculationInput,
    /// Work plus commute hours, less half the slacking hours.
    pub effective_hours: Decimal,
    /// Salary per effective hour, absent for the sentinel outcome.
    pub base_value: Option<Decimal>,
    /// Mean of the seven factors, absent for the sentinel outcome.
    pub average_factor: Option<Decimal>,
    /// The final score.
    pub score: Score,
    /// True when an intermediate value went past [`Decimal::MAX`] and was
    /// clamped. The tier is still correct; the numeric score is a floor.
    #[serde(default)]
    pub saturated: bool,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
