//! Liftlog CLI - Command-line interface for liftlog
//!
//! Commands:
//! - enrich: Enrich a set log and export it (batch mode)
//! - view: Show one day or one exercise with its summary
//! - weekly: Weekly volume rollups
//! - acwr: Acute:chronic workload ratio for the latest week
//! - trend: Estimated 1RM trend for an exercise
//! - config: Print the effective configuration

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use liftlog::pipeline::{summarize, TrainingLog};
use liftlog::types::{AcwrOutcome, EnrichedSetRecord, RawSetRecord};
use liftlog::{AnalyzerConfig, LiftAnalyzer, RawSetAdapter, SetExporter, LIFTLOG_VERSION};

/// Liftlog - Analytics for resistance-training set logs
#[derive(Parser)]
#[command(name = "liftlog")]
#[command(version = LIFTLOG_VERSION)]
#[command(about = "Derive volume, PRs, ACWR and 1RM trends from a set log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Input file path (use - for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Input format
    #[arg(long, default_value = "csv")]
    input_format: InputFormat,

    /// Analyzer configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich a set log and write every derived column
    Enrich {
        #[command(flatten)]
        input: InputArgs,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Output format
        #[arg(long, default_value = "csv")]
        output_format: OutputFormat,
    },

    /// Show the sets of one day or one exercise
    View {
        #[command(flatten)]
        input: InputArgs,

        /// Day to show (YYYY-MM-DD); defaults to the most recent day
        #[arg(long, conflicts_with = "exercise")]
        day: Option<NaiveDate>,

        /// Exercise to show (exact name)
        #[arg(long)]
        exercise: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Weekly volume, heaviest lift, reps and exercise count
    Weekly {
        #[command(flatten)]
        input: InputArgs,

        /// Only the most recent K weeks
        #[arg(long)]
        last: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Acute:chronic workload ratio for the most recent week
    Acwr {
        #[command(flatten)]
        input: InputArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Estimated 1RM trend and regression for an exercise
    Trend {
        #[command(flatten)]
        input: InputArgs,

        /// Exercise name (exact)
        #[arg(long)]
        exercise: String,

        /// Trailing window in weeks (defaults to the configured value)
        #[arg(long)]
        weeks: Option<u32>,

        /// Reference date for the window (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config {
        /// Configuration file to validate and print
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// CSV with a header row
    Csv,
    /// JSON array of set records
    Json,
    /// Newline-delimited JSON (one set per line)
    Ndjson,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// CSV with a header row
    Csv,
    /// JSON array
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), LiftlogCliError> {
    match cli.command {
        Commands::Enrich {
            input,
            output,
            output_format,
        } => cmd_enrich(&input, &output, output_format),

        Commands::View {
            input,
            day,
            exercise,
            json,
        } => cmd_view(&input, day, exercise.as_deref(), json),

        Commands::Weekly { input, last, json } => cmd_weekly(&input, last, json),

        Commands::Acwr { input, json } => cmd_acwr(&input, json),

        Commands::Trend {
            input,
            exercise,
            weeks,
            today,
            json,
        } => cmd_trend(&input, &exercise, weeks, today, json),

        Commands::Config { config } => cmd_config(config.as_deref()),
    }
}

fn cmd_enrich(
    input: &InputArgs,
    output: &Path,
    output_format: OutputFormat,
) -> Result<(), LiftlogCliError> {
    let log = load_log(input)?;
    if log.is_empty() {
        return Err(LiftlogCliError::NoSets);
    }

    let output_data = match output_format {
        OutputFormat::Csv => SetExporter::to_csv(log.records())?,
        OutputFormat::Json => SetExporter::to_json(log.records(), false)?,
        OutputFormat::JsonPretty => SetExporter::to_json(log.records(), true)?,
    };

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_view(
    input: &InputArgs,
    day: Option<NaiveDate>,
    exercise: Option<&str>,
    json: bool,
) -> Result<(), LiftlogCliError> {
    let log = load_log(input)?;

    if let Some(exercise) = exercise {
        let sets = log.by_exercise(exercise);
        let summary = summarize(sets.iter().copied());

        if json {
            let report = serde_json::json!({
                "exercise": exercise,
                "summary": summary,
                "sets": sets,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!("Summary for {}", exercise);
        print_summary(summary.total_volume, summary.total_sets, summary.heaviest_lift);
        if sets.is_empty() {
            println!("\nNo workout data found.");
        }
        for group in log.exercise_view(exercise) {
            println!("\n{}", group.day);
            print_sets(&group.sets);
        }
        return Ok(());
    }

    let Some(day) = day.or_else(|| log.days().first().copied()) else {
        return Err(LiftlogCliError::NoSets);
    };
    let sets = log.by_day(day);
    let summary = summarize(sets.iter().copied());

    if json {
        let report = serde_json::json!({
            "day": day,
            "summary": summary,
            "sets": sets,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Summary for {}", day);
    print_summary(summary.total_volume, summary.total_sets, summary.heaviest_lift);
    if sets.is_empty() {
        println!("\nNo workout data found.");
    }
    for group in log.day_view(day) {
        println!("\n{}", group.exercise);
        print_sets(&group.sets);
    }
    Ok(())
}

fn cmd_weekly(input: &InputArgs, last: Option<usize>, json: bool) -> Result<(), LiftlogCliError> {
    let log = load_log(input)?;
    let weeks = log.weekly_summary(last);

    if json {
        println!("{}", SetExporter::weekly_to_json(&weeks, true)?);
        return Ok(());
    }

    println!("Weekly Summary");
    println!("==============");
    println!(
        "{:<10} {:<12} {:>12} {:>10} {:>8} {:>10}",
        "Week", "Starting", "Volume (kg)", "Top (kg)", "Reps", "Exercises"
    );
    for week in &weeks {
        println!(
            "{:<10} {:<12} {:>12.0} {:>10.1} {:>8.0} {:>10}",
            format!("{}-W{:02}", week.iso_year, week.week),
            week.week_start,
            week.total_volume,
            week.heaviest_lift,
            week.total_reps,
            week.unique_exercise_count
        );
    }
    Ok(())
}

fn cmd_acwr(input: &InputArgs, json: bool) -> Result<(), LiftlogCliError> {
    let log = load_log(input)?;
    let outcome = log.acwr();

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("Acute:Chronic Workload Ratio");
    println!("============================");
    match outcome {
        AcwrOutcome::NotComputable { weeks_available } => {
            println!(
                "Not computable: {} week(s) of data, at least {} needed",
                weeks_available,
                log_config(input)?.acwr.min_weeks
            );
        }
        AcwrOutcome::Undefined { acute, .. } => {
            println!("Acute load:   {:.0} kg", acute);
            println!("Chronic load: 0 kg (ratio undefined)");
        }
        AcwrOutcome::Computed {
            acute,
            chronic,
            ratio,
            zone,
            chronic_weeks_used,
        } => {
            println!("Acute load:   {:.0} kg", acute);
            println!("Chronic load: {:.0} kg ({} week avg)", chronic, chronic_weeks_used);
            println!("Ratio:        {:.2} ({})", ratio, zone.as_str());
        }
    }
    Ok(())
}

fn cmd_trend(
    input: &InputArgs,
    exercise: &str,
    weeks: Option<u32>,
    today: Option<NaiveDate>,
    json: bool,
) -> Result<(), LiftlogCliError> {
    let log = load_log(input)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let report = log.trend(exercise, weeks, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Estimated 1RM for {} since {} ({} weeks)",
        report.exercise, report.window_start, report.window_weeks
    );
    if report.points.is_empty() {
        println!("No weighted sets in window.");
        return Ok(());
    }
    for point in &report.points {
        let fitted = report
            .regression
            .map(|fit| format!("{:>8.1}", fit.value_at(point.day)))
            .unwrap_or_default();
        println!("  {}  {:>8.1} {}", point.day, point.one_rep_max_estimate, fitted);
    }
    match report.regression {
        Some(fit) => println!("Trend: {:+.2} kg/week", fit.slope_per_week()),
        None => println!("Trend: need at least two training days"),
    }
    Ok(())
}

fn cmd_config(config: Option<&Path>) -> Result<(), LiftlogCliError> {
    let config = match config {
        Some(path) => AnalyzerConfig::from_json(&fs::read_to_string(path)?)?,
        None => AnalyzerConfig::default(),
    };
    println!("{}", config.to_json()?);
    Ok(())
}

// Helper functions

fn log_config(input: &InputArgs) -> Result<AnalyzerConfig, LiftlogCliError> {
    match &input.config {
        Some(path) => Ok(AnalyzerConfig::from_json(&fs::read_to_string(path)?)?),
        None => Ok(AnalyzerConfig::default()),
    }
}

fn load_log(input: &InputArgs) -> Result<TrainingLog, LiftlogCliError> {
    let analyzer = LiftAnalyzer::with_config(log_config(input)?)?;

    let input_data = if input.input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(&input.input)?
    };

    let records: Vec<RawSetRecord> = match input.input_format {
        InputFormat::Csv => RawSetAdapter::parse_csv(&input_data)?,
        InputFormat::Json => RawSetAdapter::parse_array(&input_data)?,
        InputFormat::Ndjson => RawSetAdapter::parse_ndjson(&input_data)?,
    };

    Ok(analyzer.run(&records))
}

fn print_summary(total_volume: f64, total_sets: usize, heaviest_lift: f64) {
    println!("  Total Volume:  {:.0} kg", total_volume);
    println!("  Total Sets:    {}", total_sets);
    println!("  Heaviest Lift: {:.1} kg", heaviest_lift);
}

fn print_sets(sets: &[&EnrichedSetRecord]) {
    println!(
        "  {:>5} {:>6} {:>10} {:>5} {:>10} {:>10}  {}",
        "Set #", "Reps", "Weight", "x", "Actual", "Volume", "PR"
    );
    for set in sets {
        println!(
            "  {:>5} {:>6} {:>10.1} {:>5} {:>10.1} {:>10.1}  {}",
            set.set_number,
            set.reps,
            set.weight_per_unit,
            set.multiplier,
            set.actual_weight,
            set.volume,
            if set.is_personal_record { "PR" } else { "" }
        );
    }
}

// Error types

#[derive(Debug)]
enum LiftlogCliError {
    Io(io::Error),
    Compute(liftlog::ComputeError),
    Json(serde_json::Error),
    NoSets,
}

impl From<io::Error> for LiftlogCliError {
    fn from(e: io::Error) -> Self {
        LiftlogCliError::Io(e)
    }
}

impl From<liftlog::ComputeError> for LiftlogCliError {
    fn from(e: liftlog::ComputeError) -> Self {
        LiftlogCliError::Compute(e)
    }
}

impl From<serde_json::Error> for LiftlogCliError {
    fn from(e: serde_json::Error) -> Self {
        LiftlogCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<LiftlogCliError> for CliError {
    fn from(e: LiftlogCliError) -> Self {
        match e {
            LiftlogCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            LiftlogCliError::Compute(liftlog::ComputeError::InvalidConfig(msg)) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: msg,
                hint: Some("Run 'liftlog config' to see a valid configuration".to_string()),
            },
            LiftlogCliError::Compute(e) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check that the input format matches --input-format".to_string()),
            },
            LiftlogCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            LiftlogCliError::NoSets => CliError {
                code: "NO_SETS".to_string(),
                message: "No usable sets found in input".to_string(),
                hint: Some(
                    "Rows need a parsable date and a non-excluded exercise".to_string(),
                ),
            },
        }
    }
}
