//! Tier classification.

use rust_decimal::Decimal;

use crate::models::{AuditStep, Tier};

/// Maps a numeric score to its tier.
///
/// Bands are half-open, so a score of exactly 10 is in the `[10, 30)` tier.
///
/// # Examples
///
/// ```
/// use job_worth::calculation::classify_tier;
/// use job_worth::models::Tier;
/// use rust_decimal::Decimal;
///
/// assert_eq!(classify_tier(Decimal::from(10)), Tier::Warning);
/// assert_eq!(classify_tier(Decimal::from(500)), Tier::Chosen);
/// ```
pub fn classify_tier(score: Decimal) -> Tier {
    Tier::ALL
        .iter()
        .rev()
        .copied()
        .find(|tier| tier.lower_bound().is_none_or(|lower| score >= lower))
        .unwrap_or(Tier::Hell)
}

/// The result of classifying a score.
#[derive(Debug, Clone)]
pub struct TierClassificationResult {
    /// The tier the score falls into.
    pub tier: Tier,
    /// The audit step recording this classification.
    pub audit_step: AuditStep,
}

/// Classifies a score and records the decision.
pub fn classify_with_audit(score: Decimal, step_number: u32) -> TierClassificationResult {
    let tier = classify_tier(score);

    let audit_step = AuditStep {
        step_number,
        rule_id: "tier".to_string(),
        rule_name: "Tier Classification".to_string(),
        input: serde_json::json!({
            "score": score.normalize().to_string()
        }),
        output: serde_json::json!({
            "tier": tier,
            "badge": tier.badge(),
            "range": tier.range_label()
        }),
        reasoning: format!(
            "{} falls in {} ({})",
            score.round_dp(2).normalize(),
            tier.range_label(),
            tier.badge()
        ),
    };

    TierClassificationResult { tier, audit_step }
}
