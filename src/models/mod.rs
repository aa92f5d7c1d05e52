//! Core data models for the job worth calculator.
//!
//! This module contains all the domain models used throughout the crate.

mod calculation_result;
mod factors;
mod input;
mod tier;

pub use calculation_result::{
    AuditStep, AuditTrace, CalculationResult, SENTINEL_DISPLAY, SENTINEL_MESSAGE, SENTINEL_SCORE,
    SENTINEL_TITLE, Score,
};
pub use factors::{
    Colleagues, Education, Factor, FactorSelection, OppositeSex, OverallEnvironment,
    Qualification, WorkEnvironment,
};
pub use input::{CalculationInput, DEFAULT_DISPLAY_NAME, NumericField};
pub use tier::Tier;
