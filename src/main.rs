//! revq - review enrichment validation and historical analytics engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use revq::cli;
use revq::config::Config;
use revq::Error;

#[derive(Parser)]
#[command(name = "revq")]
#[command(about = "revq - review enrichment validation and historical analytics")]
#[command(version)]
struct Cli {
    /// Override the database path from config
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and score a batch of reviews, then persist it as a run
    Analyze {
        /// JSON file with raw reviews
        #[arg(long)]
        reviews: PathBuf,

        /// JSON file with pre-computed judgments (absent entries fall back)
        #[arg(long)]
        judgments: Option<PathBuf>,

        /// Free-text note stored with the run
        #[arg(long)]
        notes: Option<String>,

        /// Skip persistence; validate and report only
        #[arg(long)]
        no_save: bool,
    },

    /// List all persisted analysis runs
    Runs,

    /// Show records for a run, optionally filtered
    Show {
        /// Run id (defaults to the latest run)
        run_id: Option<i64>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        urgency: Option<String>,

        #[arg(long)]
        min_priority: Option<i64>,

        #[arg(long)]
        min_rating: Option<i64>,

        #[arg(long)]
        max_rating: Option<i64>,

        /// Case-insensitive substring match over summaries
        #[arg(long)]
        search: Option<String>,

        /// Keep only the top N by priority
        #[arg(long)]
        top: Option<usize>,
    },

    /// Compare two runs (first is the baseline)
    Compare {
        run_a: i64,
        run_b: i64,

        /// Also write the comparison report to this path
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Aggregate statistics per run over a time window
    Trend {
        /// Window size in days (default from config)
        #[arg(long)]
        days: Option<i64>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Write the summary report for a run
    Report {
        /// Run id (defaults to the latest run)
        run_id: Option<i64>,

        #[arg(long)]
        output: PathBuf,
    },

    /// Export a run's records as JSON
    Export {
        /// Run id (defaults to the latest run)
        run_id: Option<i64>,

        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("revq=info".parse().unwrap()))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let db_path = cli.db.unwrap_or_else(|| config.db_path());

    match cli.command {
        Commands::Analyze {
            reviews,
            judgments,
            notes,
            no_save,
        } => cli::analyze::run(
            &db_path,
            &config,
            &reviews,
            judgments.as_deref(),
            notes.as_deref(),
            !no_save,
        ),
        Commands::Runs => cli::runs::run(&db_path),
        Commands::Show {
            run_id,
            category,
            urgency,
            min_priority,
            min_rating,
            max_rating,
            search,
            top,
        } => cli::show::run(
            &db_path,
            run_id,
            cli::show::ShowArgs {
                category,
                urgency,
                min_priority,
                min_rating,
                max_rating,
                search,
                top,
            },
        ),
        Commands::Compare {
            run_a,
            run_b,
            output,
        } => cli::compare::run(&db_path, run_a, run_b, output.as_deref()),
        Commands::Trend { days, category } => cli::trend::run(
            &db_path,
            days.unwrap_or(config.trend.default_days),
            category.as_deref(),
        ),
        Commands::Report { run_id, output } => {
            cli::report::run(&db_path, &config, run_id, &output)
        }
        Commands::Export { run_id, output } => cli::export::run(&db_path, run_id, &output),
    }
}
