//! Calculation input model.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FactorSelection;

/// Name shown on the result card when the user leaves the name blank.
pub const DEFAULT_DISPLAY_NAME: &str = "靓仔/靓女";

/// The four free-text numeric fields on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    /// Average daily salary.
    DailySalary,
    /// Hours worked per day.
    WorkHours,
    /// Hours commuting per day.
    CommuteHours,
    /// Hours spent slacking per day.
    SlackingHours,
}

impl NumericField {
    /// All numeric fields in form order.
    pub const ALL: [NumericField; 4] = [
        NumericField::DailySalary,
        NumericField::WorkHours,
        NumericField::CommuteHours,
        NumericField::SlackingHours,
    ];

    /// The snake_case key for this field.
    pub fn key(&self) -> &'static str {
        match self {
            NumericField::DailySalary => "daily_salary",
            NumericField::WorkHours => "work_hours",
            NumericField::CommuteHours => "commute_hours",
            NumericField::SlackingHours => "slacking_hours",
        }
    }

    /// The form label.
    pub fn label(&self) -> &'static str {
        match self {
            NumericField::DailySalary => "平均日薪酬 (元)",
            NumericField::WorkHours => "工作时长 (小时/天)",
            NumericField::CommuteHours => "通勤时长 (小时/天)",
            NumericField::SlackingHours => "摸鱼时长 (小时/天)",
        }
    }

    /// Commute and slacking time may be zero; salary and work hours may not.
    pub fn allows_zero(&self) -> bool {
        matches!(self, NumericField::CommuteHours | NumericField::SlackingHours)
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A validated set of inputs for one calculation.
///
/// Produced by [`crate::validation::validate`] and passed by value into
/// [`crate::calculation::calculate_score`]. Nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Optional display name.
    #[serde(default)]
    pub name: String,
    /// Average daily salary, greater than zero.
    pub daily_salary: Decimal,
    /// Work hours per day, greater than zero.
    pub work_hours: Decimal,
    /// Commute hours per day, zero or more.
    pub commute_hours: Decimal,
    /// Slacking hours per day, zero or more.
    pub slacking_hours: Decimal,
    /// The factor selections.
    #[serde(default)]
    pub factors: FactorSelection,
}

impl CalculationInput {
    /// The name to show on the result, falling back to a friendly default.
    pub fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            DEFAULT_DISPLAY_NAME
        } else {
            trimmed
        }
    }
}
