use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use job_worth::models::{
    Colleagues, Education, OppositeSex, OverallEnvironment, Qualification, WorkEnvironment,
};

#[derive(Debug, Parser)]
#[command(
    name = "job-worth",
    version,
    about = "Is your job worth it? Scores pay against effective hours and environment"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Calculate the worth-it score for one job.
    Calculate(CalculateArgs),
    /// List the score tiers.
    Tiers,
    /// List every factor choice and its weight.
    Factors,
}

#[derive(Debug, Args, Clone)]
pub struct CalculateArgs {
    /// Display name used in the result greeting.
    #[arg(long, default_value = "")]
    pub name: String,
    /// Average daily salary.
    #[arg(long, default_value = "")]
    pub salary: String,
    /// Hours worked per day.
    #[arg(long, default_value = "")]
    pub work_hours: String,
    /// Hours commuting per day.
    #[arg(long, default_value = "")]
    pub commute_hours: String,
    /// Hours slacking off per day.
    #[arg(long, default_value = "")]
    pub slacking_hours: String,

    /// Education: high_school, bachelor, master, doctorate (or a weight).
    #[arg(long)]
    pub education: Option<Education>,
    /// Workplace: oppressive, normal, comfortable.
    #[arg(long)]
    pub work_environment: Option<WorkEnvironment>,
    /// Opposite-sex presence: rare, moderate, plenty.
    #[arg(long)]
    pub opposite_sex: Option<OppositeSex>,
    /// Colleagues: scheming, independent, supportive.
    #[arg(long)]
    pub colleagues: Option<Colleagues>,
    /// Qualification requirement: not_required, advantage, mandatory.
    #[arg(long)]
    pub qualification: Option<Qualification>,
    /// Overall environment, from terrible to heavenly.
    #[arg(long)]
    pub overall_environment: Option<OverallEnvironment>,
    /// Work starts before 8:30.
    #[arg(long = "before-830")]
    pub before_830: bool,

    /// Print the full result, including the audit trace, as JSON.
    #[arg(long)]
    pub json: bool,
    /// Export the result as a share image.
    #[arg(long)]
    pub share: bool,
    /// Configuration file (defaults to config/job-worth.yaml if present).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Directory the share image is saved into; overrides the config.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}
