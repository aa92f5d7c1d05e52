//! Base value calculation.
//!
//! The base value is the raw pay rate per effective hour.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// The result of dividing salary by effective hours.
#[derive(Debug, Clone)]
pub struct BaseValueResult {
    /// Salary per effective hour.
    pub base_value: Decimal,
    /// True when the quotient exceeded the decimal range and was clamped to
    /// [`Decimal::MAX`].
    pub saturated: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Divides the daily salary by effective hours.
///
/// Returns `None` exactly when `effective_hours` is zero or negative; those
/// inputs take the sentinel path. Salary and hours are both positive here,
/// so a quotient too large for a `Decimal` is clamped to [`Decimal::MAX`]
/// rather than treated as a failure.
///
/// # Examples
///
/// ```
/// use job_worth::calculation::calculate_base_value;
/// use rust_decimal::Decimal;
///
/// let result = calculate_base_value(Decimal::from(300), Decimal::from(10), 2).unwrap();
/// assert_eq!(result.base_value, Decimal::from(30));
///
/// assert!(calculate_base_value(Decimal::from(300), Decimal::ZERO, 2).is_none());
/// ```
pub fn calculate_base_value(
    daily_salary: Decimal,
    effective_hours: Decimal,
    step_number: u32,
) -> Option<BaseValueResult> {
    if effective_hours <= Decimal::ZERO {
        return None;
    }

    let (base_value, saturated) = match daily_salary.checked_div(effective_hours) {
        Some(quotient) => (quotient, false),
        None => (Decimal::MAX, true),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_value".to_string(),
        rule_name: "Base Value".to_string(),
        input: serde_json::json!({
            "daily_salary": daily_salary.normalize().to_string(),
            "effective_hours": effective_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "base_value": base_value.normalize().to_string(),
            "saturated": saturated
        }),
        reasoning: format!(
            "{} / {} = {}",
            daily_salary.normalize(),
            effective_hours.normalize(),
            base_value.round_dp(4).normalize()
        ),
    };

    Some(BaseValueResult {
        base_value,
        saturated,
        audit_step,
    })
}
