//! CLI entry point for the data insight agent.

use anyhow::{Context, Result};
use clap::Parser;
use data_insight::highlights::format_amount;
use data_insight::insights::{DATE_RANGE_QUESTION, date_range_as_dates};
use data_insight::{AgentConfig, DataInsightAgent, DatasetHighlights, ResultBundle};
use std::path::PathBuf;
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Automated first-look analysis of a CSV file",
    long_about = "Profiles a CSV file, renders histograms and a correlation heatmap, \
                  answers a few templated questions and writes a JSON report.\n\n\
                  EXAMPLES:\n  \
                  # Analyze a file, artifacts in ./outputs\n  \
                  data-insight -i sales.csv\n\n  \
                  # Custom output directory, machine-readable result\n  \
                  data-insight -i sales.csv -o results/ --json\n\n  \
                  # Settings from a JSON file\n  \
                  data-insight -i sales.csv --config insight.json"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for charts and the report (overrides the config file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with agent settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Print the result bundle as JSON to stdout.
    /// Disables logging so stdout holds only the JSON.
    #[arg(long)]
    json: bool,
}

fn init_logging(level: &str, quiet: bool, json_output: bool) {
    // stdout must hold only the JSON bundle
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(args: &Args) -> Result<AgentConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str::<AgentConfig>(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => AgentConfig::default(),
    };

    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }

    config.validate()?;
    debug!("Effective config: {:?}", config);
    Ok(config)
}

/// Human-readable summary of a run.
///
/// Note: This function uses `println!` intentionally for user-facing CLI output.
fn print_summary(bundle: &ResultBundle, highlights: &DatasetHighlights) {
    println!("\n{}", "=".repeat(80));
    println!("DATA INSIGHTS");
    println!("{}\n", "=".repeat(80));

    println!("BASIC STATISTICS");
    println!("{}", "-".repeat(40));
    println!("  Rows: {}", bundle.stats.row_count);
    println!("  Columns: {}", bundle.stats.column_names.join(", "));
    match highlights.date_range {
        Some((start, end)) => println!("  Date range: {start} → {end}"),
        None => println!("  Date range: Not available"),
    }
    match &highlights.total {
        Some(total) => println!(
            "  Total (approx): {} (from column '{}')",
            format_amount(total.value),
            total.column
        ),
        None => println!("  Total: Not available"),
    }
    match highlights.top_day {
        Some(day) => println!("  Top day (approx): {day}"),
        None => println!("  Top day: Not available"),
    }
    let missing: Vec<String> = bundle
        .stats
        .missing_per_column
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(name, count)| format!("{name} ({count})"))
        .collect();
    if missing.is_empty() {
        println!("  Missing values: none");
    } else {
        println!("  Missing values: {}", missing.join(", "));
    }
    println!();

    println!("VISUALIZATIONS");
    println!("{}", "-".repeat(40));
    if bundle.plots.is_empty() {
        println!("  No numeric columns to plot");
    }
    for plot in &bundle.plots {
        println!("  - {}", plot.display());
    }
    println!();

    println!("KEY INSIGHTS");
    println!("{}", "-".repeat(40));
    if bundle.insights.is_empty() {
        println!("  No insights for this dataset");
    }
    for insight in &bundle.insights {
        let answer = if insight.question == DATE_RANGE_QUESTION {
            date_range_as_dates(&insight.answer)
        } else {
            insight.answer.clone()
        };
        println!("  Q: {}", insight.question);
        println!("  A: {answer}");
    }
    println!();

    println!("REPORT");
    println!("{}", "-".repeat(40));
    println!("  {}", bundle.report_json.display());
    println!();
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (disabled if --json is set)
    init_logging(&args.log_level, args.quiet, args.json);

    let config = load_config(&args)?;
    let agent = DataInsightAgent::new(config);

    let (bundle, highlights) = match agent.run_with_highlights(&args.input) {
        Ok(result) => result,
        Err(e) => {
            error!("Insight run failed [{}]: {}", e.error_code(), e);
            return Err(e.into());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else if !args.quiet {
        print_summary(&bundle, &highlights);
    }

    Ok(())
}
