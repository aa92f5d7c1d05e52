//! Calculation logic for the job worth calculator.
//!
//! This module contains the steps of the scoring formula: effective hours,
//! base value (salary per effective hour), factor averaging and tier
//! classification, plus [`calculate_score`] which runs them in order.

mod base_value;
mod effective_hours;
mod factor_aggregation;
mod score;
mod tier_classification;

pub use base_value::{BaseValueResult, calculate_base_value};
pub use effective_hours::{EffectiveHoursResult, calculate_effective_hours, slacking_discount};
pub use factor_aggregation::{
    FactorAggregationResult, aggregate_factors, before_830_penalty, factor_weights,
};
pub use score::{ENGINE_VERSION, calculate_score};
pub use tier_classification::{TierClassificationResult, classify_tier, classify_with_audit};
