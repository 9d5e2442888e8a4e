use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

use liftrs::export::{self, ExportFormat};
use liftrs::{
    calculate_prs, current_plan, extract_history, history, progress, theoretical_total, AppConfig,
    CompletedWorkout, LiftError, OneRepMaxes, Plan, PlanGenerator, PlanSnapshot, ProgressLog,
    ProgressUpdate,
};

/// liftrs - 5/3/1 strength plan engine
///
/// Generates four-week 5/3/1 cycles from one-rep maxes and tracks personal
/// records and 1RM history from logged training.
#[derive(Parser)]
#[command(name = "liftrs")]
#[command(version)]
#[command(about = "5/3/1 plan generator and PR tracker", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new 4-week plan from one-rep maxes
    Plan {
        #[arg(long)]
        squat: Decimal,
        #[arg(long)]
        bench: Decimal,
        #[arg(long)]
        deadlift: Decimal,
        #[arg(long)]
        press: Decimal,

        /// Write the plan as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Terminal output format (table, json)
        #[arg(short = 'f', long, default_value = "table")]
        format: String,
    },

    /// Compute personal records from completed workouts (JSON array)
    Prs {
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show 1RM history from stored plans (JSON array)
    History {
        #[arg(short, long)]
        file: PathBuf,

        /// Also write the series as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Show completion and PRs for a plan from its progress log
    Progress {
        /// Plan JSON written by `liftrs plan --output`
        #[arg(short, long)]
        plan: PathBuf,

        /// Progress updates (JSON array)
        #[arg(short, long)]
        log: PathBuf,
    },

    /// Configure application settings
    Config {
        /// List all configuration options
        #[arg(short, long)]
        list: bool,

        /// Set a configuration value (KEY=VALUE)
        #[arg(short, long)]
        set: Option<String>,

        /// Get a configuration value
        #[arg(short, long)]
        get: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    liftrs::logging::init_logging(&config.logging.with_verbosity(cli.verbose))?;

    match cli.command {
        Commands::Plan {
            squat,
            bench,
            deadlift,
            press,
            output,
            format,
        } => {
            let format = ExportFormat::parse_for_plan(&format).map_err(report)?;
            let one_rep_maxes = OneRepMaxes::new(squat, bench, deadlift, press);
            one_rep_maxes.validate().map_err(report)?;

            let generator = PlanGenerator::from_config(&config.plan);
            let plan = generator.generate_from_one_rep_maxes(&one_rep_maxes);
            print_plan(&plan, &generator, &config, format)?;

            if let Some(path) = output {
                export::json::export_json(&plan, &path)
                    .map_err(report)
                    .with_context(|| format!("Failed to write plan to {}", path.display()))?;
                println!("{}", format!("✓ Plan saved to {}", path.display()).green());
            }
        }

        Commands::Prs { file } => {
            let workouts: Vec<CompletedWorkout> = read_json(&file)?;
            let prs = calculate_prs(&workouts);

            println!("{}", "Personal records".cyan().bold());
            println!("{}", export::text::render_records(&prs, config.units));
            println!(
                "Theoretical total: {}{}",
                theoretical_total(&prs).to_string().bold(),
                config.units.suffix()
            );
        }

        Commands::History { file, csv } => {
            let plans: Vec<PlanSnapshot> = read_json(&file)?;
            let lift_history = extract_history(&plans);

            if let Some(current) = current_plan(&plans) {
                println!("Current plan: {}", current.plan_id.bold());
            }
            println!("{}", export::text::render_history(&lift_history, config.units));

            for (lift, value) in history::latest_values(&lift_history).iter() {
                if let Some(value) = value {
                    println!("  latest {}: {}{}", lift, value.normalize(), config.units.suffix());
                }
            }

            if let Some(path) = csv {
                export::csv::export_history(&lift_history, &path)
                    .map_err(report)
                    .with_context(|| format!("Failed to write history to {}", path.display()))?;
                println!("{}", format!("✓ History exported to {}", path.display()).green());
            }
        }

        Commands::Progress { plan, log } => {
            let plan: Plan = read_json(&plan)?;
            let updates: Vec<ProgressUpdate> = read_json(&log)?;
            let progress_log = ProgressLog::from_updates(updates);

            println!(
                "Plan {}: {}% of main-lift sets completed",
                plan.plan_id.bold(),
                progress_log.completion_rate(&plan)
            );

            let prs = calculate_prs(&progress::reconcile(&plan, &progress_log));
            println!("{}", export::text::render_records(&prs, config.units));
        }

        Commands::Config { list, set, get } => {
            let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_config_path);

            if list {
                for key in AppConfig::keys() {
                    println!("{} = {}", key.bold(), config.get(key)?);
                }
            } else if let Some(key_value) = set {
                let (key, value) = key_value
                    .split_once('=')
                    .context("Expected KEY=VALUE")?;
                config.set(key.trim(), value.trim())?;
                config.save_to_file(&config_path)?;
                println!("{}", format!("✓ {} updated", key.trim()).green());
            } else if let Some(key) = get {
                println!("{}", config.get(&key)?);
            }
        }
    }

    Ok(())
}

/// Log a library error at its severity and turn it into a CLI failure
fn report(err: LiftError) -> anyhow::Error {
    err.log();
    anyhow::anyhow!(err.user_message())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    export::json::import_json(path)
        .map_err(report)
        .with_context(|| format!("Failed to read {}", path.display()))
}

fn print_plan(plan: &Plan, generator: &PlanGenerator, config: &AppConfig, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Json => println!("{}", serde_json::to_string_pretty(plan)?),
        _ => {
            let tm = &plan.training_maxes;
            println!("{}", "5/3/1 plan".green().bold());
            println!(
                "  Training maxes: squat {} / bench {} / deadlift {} / press {}",
                tm.squat, tm.bench, tm.deadlift, tm.press
            );
            println!(
                "  Loading increment: {}{}",
                generator.rounding_increment().normalize(),
                config.units.suffix()
            );
            println!("  Plan id: {}", plan.plan_id.dimmed());
            println!("{}", export::text::render_plan(plan, config.units));
        }
    }
    Ok(())
}
