//! Factor aggregation.
//!
//! The seven adjustment factors (six selections plus the before-8:30
//! penalty) are combined by arithmetic mean. Multiplying them together is a
//! different policy with a different numeric range; the tier bands assume the
//! mean.

use rust_decimal::Decimal;

use crate::models::{AuditStep, Factor, FactorSelection};

/// The multiplier applied when work starts before 8:30.
pub fn before_830_penalty(before_830: bool) -> Decimal {
    if before_830 {
        Decimal::new(95, 2)
    } else {
        Decimal::ONE
    }
}

/// The named weights that go into the average, in a fixed order.
pub fn factor_weights(selection: &FactorSelection) -> [(&'static str, Decimal); 7] {
    [
        ("overall_environment", selection.overall_environment.weight()),
        ("education", selection.education.weight()),
        ("work_environment", selection.work_environment.weight()),
        ("opposite_sex", selection.opposite_sex.weight()),
        ("colleagues", selection.colleagues.weight()),
        ("qualification", selection.qualification.weight()),
        ("before_830", before_830_penalty(selection.before_830)),
    ]
}

/// The result of aggregating the factors.
#[derive(Debug, Clone)]
pub struct FactorAggregationResult {
    /// The mean of the seven factor weights.
    pub average_factor: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Averages the factor weights of a selection.
///
/// # Examples
///
/// ```
/// use job_worth::calculation::aggregate_factors;
/// use job_worth::models::FactorSelection;
/// use rust_decimal::Decimal;
///
/// let result = aggregate_factors(&FactorSelection::default(), 3);
/// assert_eq!(result.average_factor, Decimal::ONE);
/// ```
pub fn aggregate_factors(selection: &FactorSelection, step_number: u32) -> FactorAggregationResult {
    let weights = factor_weights(selection);
    let average_factor = mean(weights.iter().map(|(_, w)| *w));

    let input: serde_json::Map<String, serde_json::Value> = weights
        .iter()
        .map(|(name, weight)| ((*name).to_string(), serde_json::json!(weight.to_string())))
        .collect();

    let sum: Decimal = weights.iter().map(|(_, w)| *w).sum();

    let audit_step = AuditStep {
        step_number,
        rule_id: "factor_average".to_string(),
        rule_name: "Factor Average".to_string(),
        input: serde_json::Value::Object(input),
        output: serde_json::json!({
            "average_factor": average_factor.normalize().to_string(),
            "factor_count": weights.len()
        }),
        reasoning: format!(
            "{} / {} = {}",
            sum.normalize(),
            weights.len(),
            average_factor.round_dp(4).normalize()
        ),
    };

    FactorAggregationResult {
        average_factor,
        audit_step,
    }
}

/// Arithmetic mean, or 1 for an empty sequence.
fn mean(values: impl Iterator<Item = Decimal>) -> Decimal {
    let (sum, count) = values.fold((Decimal::ZERO, 0u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        Decimal::ONE
    } else {
        sum / Decimal::from(count)
    }
}
