use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;

use taskboard_advisor::Priority;
use taskboard_bench::config::{BenchConfig, ResolvedOutputs};
use taskboard_bench::logging::init_logging;
use taskboard_bench::runner::BenchRunner;
use taskboard_core::AppInfo;

/// Batch recommendation harness for exported task boards.
#[derive(Debug, Parser)]
#[command(
    name = "taskboard-bench",
    author,
    version,
    about = "Deterministic board recommendation harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Evaluate as of this RFC 3339 instant instead of the configured clock.
    #[arg(long, value_name = "INSTANT")]
    now: Option<DateTime<Utc>>,

    /// Cap the number of cards compared for relatedness.
    #[arg(long, value_name = "CARDS")]
    related_limit: Option<usize>,

    /// Exit after validating the configuration (no boards are analysed).
    #[arg(long)]
    validate_only: bool,

    /// Log every emitted recommendation (forces TASKBOARD_RECOMMEND_DETAILS=1).
    #[arg(long)]
    log_details: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(now) = cli.now {
        config.clock.now = Some(now);
    }

    if let Some(limit) = cli.related_limit {
        config.engine.related_limit = Some(limit);
    }

    if cli.log_details {
        config.logging.recommend_details = true;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let board_files = config.inputs.boards.len();
    let run_id = config.run_id.clone();

    println!(
        "{} {}: loaded configuration '{run_id}' with {board_files} board file{}",
        AppInfo::name(),
        AppInfo::version(),
        if board_files == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = BenchRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: no boards analysed.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Run complete for '{run_id}': {} boards → {} recommendations at {}",
        summary.boards_analyzed,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    println!("Summary (JSON): {}", summary.summary_json_path.display());
    for priority in Priority::ALL {
        println!(
            "  {priority}: {}",
            summary.totals.count_for_priority(priority)
        );
    }

    Ok(())
}
