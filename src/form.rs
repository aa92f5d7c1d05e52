//! Form state for one calculator session.
//!
//! [`CalculatorForm`] holds what the user has typed and selected, plus the
//! outcome of the most recent submission. Submitting never mutates a
//! previous result: it validates, computes a fresh [`CalculationResult`]
//! and replaces whatever outcome was stored before.

use tracing::info;

use crate::calculation::calculate_score;
use crate::error::{ExportError, ValidationError};
use crate::models::{
    CalculationResult, Colleagues, Education, FactorSelection, NumericField, OppositeSex,
    OverallEnvironment, Qualification, WorkEnvironment,
};
use crate::validation::{MaskedField, RawNumericInput, validate};

/// The outcome of a submission.
pub type Submission = Result<CalculationResult, ValidationError>;

/// The calculator form.
///
/// # Example
///
/// ```
/// use job_worth::form::CalculatorForm;
/// use job_worth::models::NumericField;
///
/// let mut form = CalculatorForm::new();
/// form.set_field(NumericField::DailySalary, "300");
/// form.set_field(NumericField::WorkHours, "8");
/// form.set_field(NumericField::CommuteHours, "1.5");
/// form.set_field(NumericField::SlackingHours, "2");
///
/// let result = form.submit().clone().unwrap();
/// assert_eq!(result.score.display(), "35.29");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CalculatorForm {
    name: String,
    daily_salary: MaskedField,
    work_hours: MaskedField,
    commute_hours: MaskedField,
    slacking_hours: MaskedField,
    factors: FactorSelection,
    outcome: Option<Submission>,
}

impl CalculatorForm {
    /// Creates an empty form with neutral factor selections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display name. Names are free text.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The display name as typed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Offers new text to a numeric field; masked-out text is ignored.
    ///
    /// Returns whether the text was accepted.
    pub fn set_field(&mut self, field: NumericField, candidate: &str) -> bool {
        self.field_mut(field).apply(candidate)
    }

    /// The current text of a numeric field.
    pub fn field(&self, field: NumericField) -> &str {
        match field {
            NumericField::DailySalary => self.daily_salary.as_str(),
            NumericField::WorkHours => self.work_hours.as_str(),
            NumericField::CommuteHours => self.commute_hours.as_str(),
            NumericField::SlackingHours => self.slacking_hours.as_str(),
        }
    }

    fn field_mut(&mut self, field: NumericField) -> &mut MaskedField {
        match field {
            NumericField::DailySalary => &mut self.daily_salary,
            NumericField::WorkHours => &mut self.work_hours,
            NumericField::CommuteHours => &mut self.commute_hours,
            NumericField::SlackingHours => &mut self.slacking_hours,
        }
    }

    /// Selects the education factor.
    pub fn select_education(&mut self, value: Education) {
        self.factors.education = value;
    }

    /// Selects the workplace environment factor.
    pub fn select_work_environment(&mut self, value: WorkEnvironment) {
        self.factors.work_environment = value;
    }

    /// Selects the opposite-sex presence factor.
    pub fn select_opposite_sex(&mut self, value: OppositeSex) {
        self.factors.opposite_sex = value;
    }

    /// Selects the colleague relations factor.
    pub fn select_colleagues(&mut self, value: Colleagues) {
        self.factors.colleagues = value;
    }

    /// Selects the qualification factor.
    pub fn select_qualification(&mut self, value: Qualification) {
        self.factors.qualification = value;
    }

    /// Selects the overall environment factor.
    pub fn select_overall_environment(&mut self, value: OverallEnvironment) {
        self.factors.overall_environment = value;
    }

    /// Toggles whether work starts before 8:30.
    pub fn set_before_830(&mut self, before_830: bool) {
        self.factors.before_830 = before_830;
    }

    /// Replaces all factor selections at once.
    pub fn set_factors(&mut self, factors: FactorSelection) {
        self.factors = factors;
    }

    /// The current factor selections.
    pub fn factors(&self) -> FactorSelection {
        self.factors
    }

    /// A snapshot of the numeric fields' text.
    pub fn raw_input(&self) -> RawNumericInput {
        RawNumericInput {
            daily_salary: self.daily_salary.as_str().to_string(),
            work_hours: self.work_hours.as_str().to_string(),
            commute_hours: self.commute_hours.as_str().to_string(),
            slacking_hours: self.slacking_hours.as_str().to_string(),
        }
    }

    /// Validates and calculates, replacing the previous outcome.
    pub fn submit(&mut self) -> &Submission {
        // A failed submission must not leave the previous result visible.
        self.outcome = None;

        let outcome = validate(&self.raw_input(), &self.name, self.factors).map(calculate_score);
        if let Err(err) = &outcome {
            info!(issues = err.issues().len(), "Submission rejected");
        }

        self.outcome.insert(outcome)
    }

    /// The outcome of the last submission, if any.
    pub fn outcome(&self) -> Option<&Submission> {
        self.outcome.as_ref()
    }

    /// The last successful result, if one is on display.
    pub fn result(&self) -> Option<&CalculationResult> {
        self.outcome.as_ref().and_then(|o| o.as_ref().ok())
    }

    /// The last validation error, if one is on display.
    pub fn error(&self) -> Option<&ValidationError> {
        self.outcome.as_ref().and_then(|o| o.as_ref().err())
    }

    /// The result to hand to the export pipeline.
    pub fn export_target(&self) -> Result<&CalculationResult, ExportError> {
        self.result().ok_or(ExportError::MissingResult)
    }
}
