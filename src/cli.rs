//! Command-line interface components.
//!
//! Terminal renderer for the pipeline: leaderboards, athlete histories, the
//! athlete list and the weight-class tables.

use crate::config::DashboardConfig;
use crate::constants::{DEFAULT_TOP_N, columns};
use crate::models::{Equipment, Federation, Lift, LiftRecord, ProgressPoint, Sex, records};
use crate::pipeline::{Dataset, lift_progression};
use crate::weight_class::WeightClassScheme;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "powerlifting-dashboard")]
#[command(about = "Explore OpenPowerlifting results: leaderboards per weight class and athlete histories")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to a results export (defaults to the newest export in the data directory)
    #[arg(long, global = true, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// Directory holding downloaded exports
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Best lifters per weight class
    Leaderboard(LeaderboardArgs),
    /// Competition history of one athlete
    History(HistoryArgs),
    /// List athlete names in the dataset
    Athletes(AthletesArgs),
    /// Show a federation's weight classes
    Classes(ClassesArgs),
}

/// How tables are written to stdout
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
}

#[derive(clap::Args, Debug)]
pub struct LeaderboardArgs {
    /// Federation whose weight classes are used (IPF, WRPF)
    #[arg(long, default_value = "IPF")]
    pub federation: Federation,

    /// Equipment categories to include, comma separated
    #[arg(long, value_delimiter = ',', default_value = "Raw")]
    pub equipment: Vec<Equipment>,

    /// Lift to rank by (squat, bench, deadlift, total, wilks)
    #[arg(long, default_value = "squat")]
    pub lift: Lift,

    /// Sex to rank (M, F)
    #[arg(long, default_value = "M")]
    pub sex: Sex,

    /// Lifters per weight class
    #[arg(short = 'n', long = "top", default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug)]
pub struct HistoryArgs {
    /// Athlete name, matched exactly (defaults to the preselected athlete)
    pub name: Option<String>,

    /// Also list the progression of one lift
    #[arg(long)]
    pub lift: Option<Lift>,

    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(clap::Args, Debug)]
pub struct AthletesArgs {
    /// Maximum number of names to print
    #[arg(long, default_value_t = 50)]
    pub limit: usize,

    /// Only names containing this text
    #[arg(long)]
    pub contains: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ClassesArgs {
    #[arg(long, default_value = "IPF")]
    pub federation: Federation,

    #[arg(long, default_value = "M")]
    pub sex: Sex,
}

impl Args {
    /// Log level implied by the verbosity flags, if any was given
    pub fn get_log_level(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("warn")
        } else {
            None
        }
    }

    /// Configuration from defaults overridden by the global flags
    pub fn base_config(&self) -> DashboardConfig {
        let mut config = DashboardConfig::default();
        if let Some(level) = self.get_log_level() {
            config = config.with_log_level(level);
        }
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir);
        }
        if let Some(path) = &self.data {
            config = config.with_data_path(path);
        }
        config
    }
}

/// Run a parsed command line
pub fn run(args: Args) -> Result<()> {
    let config = args.base_config();
    setup_logging(&config, args.quiet)?;

    match &args.command {
        Command::Classes(classes) => {
            show_classes(classes);
            Ok(())
        }
        Command::Leaderboard(leaderboard) => {
            let config = config
                .with_federation(leaderboard.federation)
                .with_equipment(leaderboard.equipment.iter().copied())
                .with_top_n(leaderboard.top_n);
            config.validate()?;
            let dataset = load_dataset(&config, args.quiet)?;
            show_leaderboard(&dataset, &config, leaderboard)
        }
        Command::History(history) => {
            let dataset = load_dataset(&config, args.quiet)?;
            let name = history
                .name
                .clone()
                .unwrap_or_else(|| config.default_athlete.clone());
            show_history(&dataset, &name, history)
        }
        Command::Athletes(athletes) => {
            let dataset = load_dataset(&config, args.quiet)?;
            show_athletes(&dataset, athletes)
        }
    }
}

/// Install the stderr subscriber for the configured level.
///
/// `RUST_LOG` overrides the level. Quiet runs get a compact layer without timer.
fn setup_logging(config: &DashboardConfig, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_directive()));

    let layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);
    let layer = if quiet {
        layer.compact().boxed()
    } else {
        layer.with_timer(fmt::time::uptime()).boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("Failed to install logger")?;

    debug!("Logging initialized with filter {}", config.log_directive());
    Ok(())
}

/// Locate and load the export behind a spinner
fn load_dataset(config: &DashboardConfig, quiet: bool) -> Result<Dataset> {
    let path = config
        .resolve_dataset_path()
        .context("No results export to load; pass --data or --data-dir")?;

    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Loading {}", path.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let loaded = Dataset::load(&path);
    spinner.finish_and_clear();

    let dataset = loaded.with_context(|| format!("Failed to load {}", path.display()))?;
    let stats = dataset.stats();
    if !quiet {
        eprintln!(
            "{} {} of {} rows from {}",
            "Loaded".bright_green(),
            stats.rows_kept.to_string().bright_white().bold(),
            stats.rows_read,
            dataset.origin().bright_cyan()
        );
    }
    Ok(dataset)
}

fn show_leaderboard(
    dataset: &Dataset,
    config: &DashboardConfig,
    args: &LeaderboardArgs,
) -> Result<()> {
    let board = dataset.leaderboard(
        config.federation,
        &config.equipment,
        args.lift,
        args.sex,
        config.top_n,
    )?;

    if args.format == OutputFormat::Csv {
        let selection = [
            columns::WEIGHT_CLASS,
            columns::NAME,
            columns::BODYWEIGHT,
            args.lift.column(),
            columns::MEET,
            columns::PARENT_FEDERATION,
            columns::DATE,
        ];
        return write_csv(board.select(selection)?);
    }

    let equipment: Vec<&str> = config.equipment.iter().map(|e| e.as_str()).collect();
    println!(
        "{}",
        format!(
            "Best {} per weight class ({}, {}, {})",
            args.lift.title(),
            args.sex,
            config.federation,
            equipment.join("/")
        )
        .bright_green()
        .bold()
    );

    let mut current_class: Option<String> = None;
    let mut rank = 0;
    for record in records(&board)? {
        if record.weight_class != current_class {
            current_class = record.weight_class.clone();
            rank = 0;
            println!(
                "\n  {} {}",
                "Class".bright_yellow(),
                current_class.as_deref().unwrap_or("?").bright_white().bold()
            );
        }
        rank += 1;
        println!(
            "  {:>3}. {:<28} {:>8} kg  bw {:>6}  {} ({}, {})",
            rank,
            record.name,
            format_kg(lift_value(&record, args.lift)),
            format_kg(record.bodyweight),
            record.meet.as_deref().unwrap_or("-"),
            record.parent_federation.as_deref().unwrap_or("-"),
            format_date(&record),
        );
    }
    if current_class.is_none() {
        println!("  {}", "No lifters match this selection".bright_black());
    }
    Ok(())
}

fn show_history(dataset: &Dataset, name: &str, args: &HistoryArgs) -> Result<()> {
    let entries = dataset.history(name)?;

    if args.format == OutputFormat::Csv {
        return write_csv(entries);
    }

    println!("{} {}", "History of".bright_green().bold(), name.bright_white().bold());
    if entries.height() == 0 {
        println!("  {}", "No entries found".bright_black());
        return Ok(());
    }

    for record in records(&entries)? {
        println!(
            "  {}  {:<40} {:<10} {:>6} kg bw  S {:>6}  B {:>6}  D {:>6}  T {:>6}  Wilks {}",
            format_date(&record),
            record.meet.as_deref().unwrap_or("-"),
            record.equipment.as_deref().unwrap_or("-"),
            format_kg(record.bodyweight),
            format_kg(record.squat_best),
            format_kg(record.bench_best),
            format_kg(record.deadlift_best),
            format_kg(record.total),
            format_kg(record.wilks),
        );
    }

    if let Some(lift) = args.lift {
        println!("\n{} {}", lift.title().bright_yellow(), "progression".bright_yellow());
        for point in lift_progression(&entries, lift)? {
            print_progress_point(&point);
        }
    }
    Ok(())
}

fn print_progress_point(point: &ProgressPoint) {
    let date = point
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "----------".to_string());
    let attempts = point
        .attempts
        .map(|attempts| {
            let listed: Vec<String> = attempts.iter().map(|a| format_kg(*a)).collect();
            format!("  [{}]", listed.join(", "))
        })
        .unwrap_or_default();
    println!(
        "  {}  {:>8}{}  {}",
        date,
        format_kg(point.best),
        attempts,
        point.meet.as_deref().unwrap_or("-")
    );
}

fn show_athletes(dataset: &Dataset, args: &AthletesArgs) -> Result<()> {
    let names = dataset.athlete_names()?;
    let total = names.len();
    let matching: Vec<String> = names
        .into_iter()
        .filter(|name| args.contains.as_deref().is_none_or(|text| name.contains(text)))
        .collect();

    for name in matching.iter().take(args.limit) {
        println!("{}", name);
    }
    eprintln!(
        "{} of {} matching ({} athletes in dataset)",
        matching.len().min(args.limit),
        matching.len(),
        total
    );
    Ok(())
}

fn show_classes(args: &ClassesArgs) {
    let scheme = WeightClassScheme::for_division(args.federation, args.sex);
    println!(
        "{}",
        format!("{} weight classes ({})", args.federation, args.sex)
            .bright_green()
            .bold()
    );
    let boundaries = scheme.boundaries();
    for (i, label) in scheme.labels().iter().enumerate() {
        let range = if i + 1 == scheme.labels().len() {
            format!("> {} kg", boundaries[i])
        } else {
            format!("({}, {}] kg", boundaries[i], boundaries[i + 1])
        };
        println!("  {:>6}  {}", label.bright_white().bold(), range);
    }
}

fn write_csv(mut table: DataFrame) -> Result<()> {
    let stdout = std::io::stdout();
    CsvWriter::new(stdout.lock())
        .include_header(true)
        .finish(&mut table)
        .context("Failed to write CSV")?;
    Ok(())
}

fn lift_value(record: &LiftRecord, lift: Lift) -> Option<f64> {
    match lift {
        Lift::SquatBest => record.squat_best,
        Lift::BenchBest => record.bench_best,
        Lift::DeadliftBest => record.deadlift_best,
        Lift::Total => record.total,
        Lift::Wilks => record.wilks,
    }
}

fn format_kg(value: Option<f64>) -> String {
    value.map(|v| format!("{}", v)).unwrap_or_else(|| "-".to_string())
}

fn format_date(record: &LiftRecord) -> String {
    record
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "----------".to_string())
}
