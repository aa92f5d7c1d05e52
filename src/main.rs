mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{CalculateArgs, Cli, Commands};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use job_worth::calculation::before_830_penalty;
use job_worth::config::{ConfigLoader, DonationSettings};
use job_worth::export::{
    CardRenderer, ExportOutcome, ExportPipeline, FileDownloader, PngEncoder, UnavailableShare,
    load_overlay,
};
use job_worth::form::CalculatorForm;
use job_worth::models::{
    CalculationResult, Colleagues, Education, Factor, NumericField, OppositeSex,
    OverallEnvironment, Qualification, Tier, WorkEnvironment,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Calculate(args) => calculate(args).await,
        Commands::Tiers => {
            print_tiers();
            Ok(0)
        }
        Commands::Factors => {
            print_factors();
            Ok(0)
        }
    }
}

async fn calculate(args: CalculateArgs) -> Result<i32> {
    let loader = ConfigLoader::load_or_default(args.config.as_deref())?;
    let mut form = fill_form(&args);

    let result = match form.submit() {
        Ok(result) => result.clone(),
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("{}", err.details());
            return Ok(1);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result, &loader.config().donation);
    }

    if !args.share {
        return Ok(0);
    }

    let config = loader.config();
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.export.output_dir.clone());
    let overlay = config.export.overlay_path.as_deref().and_then(load_overlay);

    let pipeline = ExportPipeline::new(
        CardRenderer,
        PngEncoder::new(),
        UnavailableShare,
        FileDownloader::new(output_dir),
    )
    .with_config(config)?
    .with_overlay(overlay);

    match pipeline.export_form(&form).await {
        Ok(ExportOutcome::Shared) => {
            println!("分享成功！");
            Ok(0)
        }
        Ok(ExportOutcome::Downloaded { path, notice }) => {
            if let Some(notice) = notice {
                eprintln!("{}", notice);
            }
            println!("图片已保存：{}", path.display());
            Ok(0)
        }
        Err(err) => {
            warn!(error = %err, "Export failed");
            eprintln!("{}", err.user_message());
            Ok(1)
        }
    }
}

fn fill_form(args: &CalculateArgs) -> CalculatorForm {
    let mut form = CalculatorForm::new();
    form.set_name(args.name.clone());

    let fields = [
        (NumericField::DailySalary, &args.salary),
        (NumericField::WorkHours, &args.work_hours),
        (NumericField::CommuteHours, &args.commute_hours),
        (NumericField::SlackingHours, &args.slacking_hours),
    ];
    for (field, value) in fields {
        if !form.set_field(field, value.trim()) {
            warn!(field = %field, value = %value, "Ignoring non-numeric input");
        }
    }

    let mut factors = form.factors();
    factors.education = args.education.unwrap_or_default();
    factors.work_environment = args.work_environment.unwrap_or_default();
    factors.opposite_sex = args.opposite_sex.unwrap_or_default();
    factors.colleagues = args.colleagues.unwrap_or_default();
    factors.qualification = args.qualification.unwrap_or_default();
    factors.overall_environment = args.overall_environment.unwrap_or_default();
    factors.before_830 = args.before_830;
    form.set_factors(factors);

    form
}

fn print_result(result: &CalculationResult, donation: &DonationSettings) {
    let name = result.input.display_name();
    println!("喂 {}, 你的上班性价比指数是：", name);

    match result.score.tier() {
        Some(tier) => println!("  {} [{}]", result.score.display(), tier.badge()),
        None => println!("  {}", result.score.display()),
    }
    println!("(指数越高，代表单位有效时间回报和环境满意度越高。仅供娱乐，切勿当真哦！)");
    println!();
    println!("{}: {}", result.score.title(), result.score.message());

    let donation = donation.lines();
    if !donation.is_empty() {
        println!();
        for line in donation {
            println!("{}", line);
        }
    }
}

fn print_tiers() {
    for tier in Tier::ALL {
        println!(
            "{:<12} {}  {}: {}",
            tier.range_label(),
            tier.badge(),
            tier.title(),
            tier.message()
        );
    }
}

fn print_factors() {
    print_factor::<Education>("--education");
    print_factor::<WorkEnvironment>("--work-environment");
    print_factor::<OppositeSex>("--opposite-sex");
    print_factor::<Colleagues>("--colleagues");
    print_factor::<Qualification>("--qualification");
    print_factor::<OverallEnvironment>("--overall-environment");
    println!("--before-830");
    println!("  8:30 前上班，乘以 {}", before_830_penalty(true));
}

fn print_factor<F: Factor>(flag: &str) {
    println!("{}", flag);
    for choice in F::all() {
        println!(
            "  {:<14} {:<4} {}",
            choice.key(),
            choice.weight(),
            choice.label()
        );
    }
    println!();
}
