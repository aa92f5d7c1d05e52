//! Effective hours calculation.
//!
//! Effective hours are the time a job really costs per day: work plus commute,
//! with half of any slacking time given back.

use rust_decimal::Decimal;

use crate::models::{AuditStep, CalculationInput};

/// The share of slacking time deducted from work and commute time.
pub fn slacking_discount() -> Decimal {
    Decimal::new(5, 1)
}

/// The result of computing effective hours.
#[derive(Debug, Clone)]
pub struct EffectiveHoursResult {
    /// `work + commute - 0.5 * slacking`; may be zero or negative.
    pub effective_hours: Decimal,
    /// True when the sum exceeded the decimal range and was clamped to
    /// [`Decimal::MAX`].
    pub saturated: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

impl EffectiveHoursResult {
    /// Returns true when slacking dominates and no rate can be computed.
    pub fn is_non_positive(&self) -> bool {
        self.effective_hours <= Decimal::ZERO
    }
}

/// Computes effective hours for an input.
///
/// # Examples
///
/// ```
/// use job_worth::calculation::calculate_effective_hours;
/// use job_worth::models::{CalculationInput, FactorSelection};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input = CalculationInput {
///     name: String::new(),
///     daily_salary: Decimal::from(300),
///     work_hours: Decimal::from(8),
///     commute_hours: Decimal::from_str("1.5").unwrap(),
///     slacking_hours: Decimal::from(2),
///     factors: FactorSelection::default(),
/// };
///
/// let result = calculate_effective_hours(&input, 1);
/// assert_eq!(result.effective_hours, Decimal::from_str("8.5").unwrap());
/// ```
pub fn calculate_effective_hours(input: &CalculationInput, step_number: u32) -> EffectiveHoursResult {
    let discount = slacking_discount();
    // Halving cannot overflow, and work minus a non-negative amount stays in
    // range, so only the final addition can exceed Decimal::MAX.
    let kept = input.work_hours - discount * input.slacking_hours;
    let (effective_hours, saturated) = match kept.checked_add(input.commute_hours) {
        Some(sum) => (sum, false),
        None => (Decimal::MAX, true),
    };
    let non_positive = effective_hours <= Decimal::ZERO;

    let reasoning = if non_positive {
        format!(
            "{} + {} - {} x {} = {} <= 0, slacking dominates",
            input.work_hours.normalize(),
            input.commute_hours.normalize(),
            discount,
            input.slacking_hours.normalize(),
            effective_hours.normalize()
        )
    } else if saturated {
        format!(
            "{} + {} - {} x {} exceeds the decimal range, clamped to {}",
            input.work_hours.normalize(),
            input.commute_hours.normalize(),
            discount,
            input.slacking_hours.normalize(),
            effective_hours
        )
    } else {
        format!(
            "{} + {} - {} x {} = {}",
            input.work_hours.normalize(),
            input.commute_hours.normalize(),
            discount,
            input.slacking_hours.normalize(),
            effective_hours.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "effective_hours".to_string(),
        rule_name: "Effective Hours".to_string(),
        input: serde_json::json!({
            "work_hours": input.work_hours.normalize().to_string(),
            "commute_hours": input.commute_hours.normalize().to_string(),
            "slacking_hours": input.slacking_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "effective_hours": effective_hours.normalize().to_string(),
            "non_positive": non_positive,
            "saturated": saturated
        }),
        reasoning,
    };

    EffectiveHoursResult {
        effective_hours,
        saturated,
        audit_step,
    }
}
