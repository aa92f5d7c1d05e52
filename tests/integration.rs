//! End-to-end tests for the job worth-it calculator.
//!
//! This suite covers:
//! - Form submission from raw text through to a scored result
//! - The worked examples (ordinary, sentinel, boundary)
//! - Validation failures
//! - Factor effects
//! - Share-image export to disk
//! - Properties of the score and tier classification

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use job_worth::calculation::{calculate_score, classify_tier};
use job_worth::config::ConfigLoader;
use job_worth::error::{ExportError, IssueKind};
use job_worth::export::{
    CardRenderer, ExportOutcome, ExportPipeline, FileDownloader, PngEncoder, UnavailableShare,
    decode_png,
};
use job_worth::form::CalculatorForm;
use job_worth::models::{
    CalculationInput, Colleagues, Education, FactorSelection, NumericField, OverallEnvironment,
    Score, Tier, WorkEnvironment,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn form_with(salary: &str, work: &str, commute: &str, slacking: &str) -> CalculatorForm {
    let mut form = CalculatorForm::new();
    assert!(form.set_field(NumericField::DailySalary, salary));
    assert!(form.set_field(NumericField::WorkHours, work));
    assert!(form.set_field(NumericField::CommuteHours, commute));
    assert!(form.set_field(NumericField::SlackingHours, slacking));
    form
}

fn input(salary: Decimal, work: Decimal, commute: Decimal, slacking: Decimal) -> CalculationInput {
    CalculationInput {
        name: String::new(),
        daily_salary: salary,
        work_hours: work,
        commute_hours: commute,
        slacking_hours: slacking,
        factors: FactorSelection::default(),
    }
}

fn local_pipeline(
    dir: &std::path::Path,
) -> ExportPipeline<CardRenderer, PngEncoder, UnavailableShare, FileDownloader> {
    ExportPipeline::new(
        CardRenderer,
        PngEncoder::new(),
        UnavailableShare,
        FileDownloader::new(dir),
    )
}

// =============================================================================
// Worked Examples
// =============================================================================

#[test]
fn test_ordinary_day_scores_endure_tier() {
    let mut form = form_with("300", "8", "1.5", "2");
    form.set_name("打工人");

    let result = form.submit().clone().unwrap();

    assert_eq!(result.effective_hours, decimal("8.5"));
    assert_eq!(result.average_factor, Some(Decimal::ONE));
    assert_eq!(result.score.display(), "35.29");
    assert_eq!(result.score.tier(), Some(Tier::Endure));
    assert_eq!(result.input.display_name(), "打工人");
    assert_eq!(result.audit_trace.steps.len(), 4);
}

#[test]
fn test_heavy_slacking_yields_sentinel() {
    let mut form = form_with("123456", "4", "0", "10");

    let result = form.submit().clone().unwrap();

    assert_eq!(result.score, Score::Sentinel);
    assert_eq!(result.effective_hours, decimal("-1"));
    assert!(result.base_value.is_none());
    assert_eq!(result.score.display(), "摸鱼™爽翻天");
    assert_eq!(result.audit_trace.steps.len(), 1);
}

#[test]
fn test_score_of_exactly_ten_is_warning_tier() {
    let mut form = form_with("80", "8", "0", "0");
    let result = form.submit().clone().unwrap();

    assert_eq!(result.score.numeric(), decimal("10"));
    assert_eq!(result.score.tier(), Some(Tier::Warning));
}

#[test]
fn test_blank_name_uses_default_greeting() {
    let mut form = form_with("300", "8", "0", "0");
    form.set_name("   ");

    let result = form.submit().clone().unwrap();
    assert_eq!(result.input.display_name(), "靓仔/靓女");
}

#[test]
fn test_maximum_salary_with_heavenly_environment_is_clamped() {
    let mut form = form_with("79228162514264337593543950335", "1", "0", "0");
    form.select_overall_environment(OverallEnvironment::Heavenly);

    let result = form.submit().clone().unwrap();

    assert_eq!(result.score.numeric(), Decimal::MAX);
    assert_eq!(result.score.tier(), Some(Tier::Chosen));
    assert!(result.saturated);
}

#[test]
fn test_enormous_work_and_commute_hours_are_clamped() {
    let mut form = form_with(
        "300",
        "50000000000000000000000000000",
        "50000000000000000000000000000",
        "0",
    );

    let result = form.submit().clone().unwrap();

    assert_eq!(result.effective_hours, Decimal::MAX);
    assert_eq!(result.score.tier(), Some(Tier::Hell));
    assert!(result.saturated);
}

#[test]
fn test_tiny_positive_work_hours_are_not_the_sentinel() {
    let mut form = form_with("1000", "0.0000000000000000000000000001", "0", "0");

    let result = form.submit().clone().unwrap();

    assert!(!result.score.is_sentinel());
    assert_eq!(result.score.display(), "79228162514264337593543950335.00");
    assert_eq!(result.score.tier(), Some(Tier::Chosen));
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_salary_beyond_decimal_range_is_out_of_range() {
    let mut form = form_with("100000000000000000000000000000", "8", "0", "0");

    let err = form.submit().clone().unwrap_err();
    assert_eq!(err.issues().len(), 1);
    assert_eq!(err.issues()[0].kind, IssueKind::OutOfRange);
}

#[test]
fn test_zero_salary_is_rejected() {
    let mut form = form_with("0", "8", "1", "1");

    let err = form.submit().clone().unwrap_err();
    assert!(err.has_issue(NumericField::DailySalary));
    assert_eq!(err.issues().len(), 1);
    assert_eq!(err.issues()[0].kind, IssueKind::NotPositive);
    assert!(form.result().is_none());
}

#[test]
fn test_every_bad_field_is_reported() {
    let mut form = CalculatorForm::new();
    form.set_field(NumericField::CommuteHours, ".");

    let err = form.submit().clone().unwrap_err();
    for field in NumericField::ALL {
        assert!(err.has_issue(field), "missing issue for {}", field);
    }
}

#[test]
fn test_mask_rejects_letters_and_signs() {
    let mut form = CalculatorForm::new();
    assert!(!form.set_field(NumericField::DailySalary, "-300"));
    assert!(!form.set_field(NumericField::DailySalary, "3e2"));
    assert!(!form.set_field(NumericField::DailySalary, "1.2.3"));
    assert!(form.set_field(NumericField::DailySalary, "300."));
    assert_eq!(form.field(NumericField::DailySalary), "300.");
}

#[test]
fn test_failed_resubmission_clears_previous_result() {
    let mut form = form_with("300", "8", "1.5", "2");
    assert!(form.submit().is_ok());

    form.set_field(NumericField::WorkHours, "");
    assert!(form.submit().is_err());
    assert!(form.result().is_none());
    assert!(form.error().is_some());
}

// =============================================================================
// Factors
// =============================================================================

#[test]
fn test_factors_scale_by_their_average() {
    let mut form = form_with("300", "8", "1.5", "2");
    form.select_overall_environment(OverallEnvironment::Heavenly);
    form.select_education(Education::Doctorate);
    form.select_colleagues(Colleagues::Supportive);
    form.select_work_environment(WorkEnvironment::Comfortable);

    let result = form.submit().clone().unwrap();

    // (2.0 + 1.2 + 1.2 + 1.0 + 1.3 + 1.0 + 1.0) / 7
    let expected_average = decimal("8.7") / Decimal::from(7);
    assert_eq!(result.average_factor, Some(expected_average));
    assert!(result.score.numeric() > decimal("35.29"));
}

#[test]
fn test_early_start_lowers_score() {
    let mut late = form_with("300", "8", "1.5", "2");
    let mut early = form_with("300", "8", "1.5", "2");
    early.set_before_830(true);

    let late = late.submit().clone().unwrap();
    let early = early.submit().clone().unwrap();

    assert!(early.score.numeric() < late.score.numeric());
}

#[test]
fn test_factor_flags_parse_keys_and_weights() {
    assert_eq!("master".parse::<Education>().unwrap(), Education::Master);
    assert_eq!("1.1".parse::<Education>().unwrap(), Education::Master);
    assert_eq!(
        "BELOW-PAR".parse::<OverallEnvironment>().unwrap(),
        OverallEnvironment::BelowPar
    );
    assert!("1.05".parse::<Education>().is_err());
}

// =============================================================================
// JSON Output
// =============================================================================

#[test]
fn test_result_serializes_decimals_as_strings() {
    let mut form = form_with("300", "8", "1.5", "2");
    let result = form.submit().clone().unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["effective_hours"], "8.5");
    assert_eq!(json["score"]["kind"], "value");
    assert_eq!(json["score"]["tier"], "endure");
    assert_eq!(json["audit_trace"]["steps"][0]["rule_id"], "effective_hours");
}

// =============================================================================
// Export
// =============================================================================

#[tokio::test]
async fn test_export_writes_decodable_png() {
    let dir = tempfile::tempdir().unwrap();
    let mut form = form_with("300", "8", "1.5", "2");
    form.submit();

    let outcome = local_pipeline(dir.path()).export_form(&form).await.unwrap();

    let ExportOutcome::Downloaded { path, notice } = outcome else {
        panic!("expected a download");
    };
    assert!(notice.is_none());

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");

    // Default pixel ratio 2 on a 320x160 card, plus the footer band.
    let image = decode_png(bytes.as_slice()).unwrap();
    assert_eq!(image.width(), 640);
    assert_eq!(image.height(), 320 + 140);
}

#[tokio::test]
async fn test_sentinel_result_exports() {
    let dir = tempfile::tempdir().unwrap();
    let mut form = form_with("300", "4", "0", "10");
    form.submit();

    let outcome = local_pipeline(dir.path()).export_form(&form).await;
    assert!(outcome.is_ok());
}

#[tokio::test]
async fn test_export_after_failed_submission_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut form = form_with("0", "8", "0", "0");
    form.submit();

    let err = local_pipeline(dir.path()).export_form(&form).await.unwrap_err();
    assert_eq!(err, ExportError::MissingResult);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_export_honours_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("job-worth.yaml");
    std::fs::write(
        &config_path,
        "export:\n  filename: result.png\n  render:\n    pixel_ratio: 1\n",
    )
    .unwrap();
    let loader = ConfigLoader::load(&config_path).unwrap();

    let mut form = form_with("300", "8", "1.5", "2");
    form.submit();

    let pipeline = local_pipeline(dir.path())
        .with_config(loader.config())
        .unwrap();
    let ExportOutcome::Downloaded { path, .. } = pipeline.export_form(&form).await.unwrap() else {
        panic!("expected a download");
    };

    assert_eq!(path, dir.path().join("result.png"));
    let image = decode_png(std::fs::read(&path).unwrap().as_slice()).unwrap();
    assert_eq!(image.width(), 320);
}

// =============================================================================
// Properties
// =============================================================================

fn hours() -> impl Strategy<Value = Decimal> {
    (0i64..=2400).prop_map(|n| Decimal::new(n, 2))
}

fn positive_hours() -> impl Strategy<Value = Decimal> {
    (1i64..=2400).prop_map(|n| Decimal::new(n, 2))
}

fn salary() -> impl Strategy<Value = Decimal> {
    (1i64..=10_000_000).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    #[test]
    fn prop_same_input_same_score(
        salary in salary(),
        work in positive_hours(),
        commute in hours(),
        slacking in hours(),
    ) {
        let first = calculate_score(input(salary, work, commute, slacking));
        let second = calculate_score(input(salary, work, commute, slacking));

        prop_assert_eq!(first.score, second.score);
        prop_assert_eq!(first.effective_hours, second.effective_hours);
    }

    #[test]
    fn prop_sentinel_iff_effective_hours_not_positive(
        salary in salary(),
        work in positive_hours(),
        commute in hours(),
        slacking in hours(),
    ) {
        let result = calculate_score(input(salary, work, commute, slacking));
        let effective = work + commute - slacking * Decimal::new(5, 1);

        prop_assert_eq!(result.effective_hours, effective);
        prop_assert_eq!(result.score.is_sentinel(), effective <= Decimal::ZERO);
    }

    #[test]
    fn prop_tiny_positive_hours_never_yield_sentinel(
        salary in salary(),
        ticks in 1i64..=1_000_000,
    ) {
        let work = Decimal::new(ticks, 28);
        let result = calculate_score(input(salary, work, Decimal::ZERO, Decimal::ZERO));

        prop_assert!(result.effective_hours > Decimal::ZERO);
        prop_assert!(!result.score.is_sentinel());
        prop_assert_eq!(result.score.tier(), Some(Tier::Chosen));
    }

    #[test]
    fn prop_every_score_has_exactly_one_tier(cents in 0i64..100_000) {
        let score = Decimal::new(cents, 2);
        let matching: Vec<_> = Tier::ALL.iter().filter(|t| t.contains(score)).collect();

        prop_assert_eq!(matching.len(), 1);
        prop_assert_eq!(*matching[0], classify_tier(score));
    }

    #[test]
    fn prop_tiers_never_decrease_with_score(a in 0i64..100_000, b in 0i64..100_000) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify_tier(Decimal::new(low, 2)) <= classify_tier(Decimal::new(high, 2)));
    }
}
