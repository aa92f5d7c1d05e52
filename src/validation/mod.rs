//! Input masking and validation.
//!
//! Masking runs on every keystroke and silently drops text that is not an
//! unsigned decimal. Validation runs once, on submit, and either produces a
//! [`crate::models::CalculationInput`] or a combined
//! [`crate::error::ValidationError`].

mod mask;
mod validator;

pub use mask::{MaskedField, accepts};
pub use validator::{RawNumericInput, parse_decimal, validate, validate_field};
