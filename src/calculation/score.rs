//! Score calculation.
//!
//! Runs the formula end to end: effective hours, then (unless slacking
//! dominates) base value, factor average and tier.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{AuditTrace, CalculationInput, CalculationResult, Score};

use super::base_value::calculate_base_value;
use super::effective_hours::calculate_effective_hours;
use super::factor_aggregation::aggregate_factors;
use super::tier_classification::classify_with_audit;

/// The version stamped on every result.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Computes the cost-performance score for a validated input.
///
/// The function is pure apart from the generated id and timestamp: the same
/// input always yields the same score, tier and audit steps. When effective
/// hours are zero or negative the score is [`Score::Sentinel`] and no other
/// step runs.
///
/// # Examples
///
/// ```
/// use job_worth::calculation::calculate_score;
/// use job_worth::models::{CalculationInput, FactorSelection, Tier};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input = CalculationInput {
///     name: "打工人".to_string(),
///     daily_salary: Decimal::from(300),
///     work_hours: Decimal::from(8),
///     commute_hours: Decimal::from_str("1.5").unwrap(),
///     slacking_hours: Decimal::from(2),
///     factors: FactorSelection::default(),
/// };
///
/// let result = calculate_score(input);
/// assert_eq!(result.score.display(), "35.29");
/// assert_eq!(result.score.tier(), Some(Tier::Endure));
/// ```
pub fn calculate_score(input: CalculationInput) -> CalculationResult {
    let calculation_id = Uuid::new_v4();
    let start_time = Instant::now();
    let mut steps = Vec::with_capacity(4);

    let effective = calculate_effective_hours(&input, 1);
    let effective_hours = effective.effective_hours;
    steps.push(effective.audit_step);

    let Some(base) = calculate_base_value(input.daily_salary, effective_hours, 2) else {
        info!(
            calculation_id = %calculation_id,
            effective_hours = %effective_hours,
            "Effective hours not positive, returning sentinel score"
        );
        return CalculationResult {
            calculation_id,
            timestamp: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            input,
            effective_hours,
            base_value: None,
            average_factor: None,
            score: Score::Sentinel,
            saturated: false,
            audit_trace: AuditTrace {
                steps,
                duration_us: start_time.elapsed().as_micros() as u64,
            },
        };
    };
    let base_value = base.base_value;
    let mut saturated = effective.saturated || base.saturated;
    steps.push(base.audit_step);

    let aggregation = aggregate_factors(&input.factors, 3);
    let average_factor = aggregation.average_factor;
    steps.push(aggregation.audit_step);

    // The average is positive, so an overflowing product is clamped upward.
    let value = match base_value.checked_mul(average_factor) {
        Some(product) => product,
        None => {
            saturated = true;
            Decimal::MAX
        }
    };
    if saturated {
        warn!(
            calculation_id = %calculation_id,
            "Intermediate value exceeded the decimal range, clamped to the maximum"
        );
    }
    debug!(
        calculation_id = %calculation_id,
        base_value = %base_value,
        average_factor = %average_factor,
        "Applied factor average"
    );

    let classification = classify_with_audit(value, 4);
    steps.push(classification.audit_step);

    let score = Score::Value {
        value,
        tier: classification.tier,
    };

    info!(
        calculation_id = %calculation_id,
        score = %score.display(),
        tier = ?classification.tier,
        "Calculation completed successfully"
    );

    CalculationResult {
        calculation_id,
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        input,
        effective_hours,
        base_value: Some(base_value),
        average_factor: Some(average_factor),
        score,
        saturated,
        audit_trace: AuditTrace {
            steps,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    }
}
