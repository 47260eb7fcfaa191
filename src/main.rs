use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sales_report::pipeline::{self, RunSummary};
use sales_report::{ReportError, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(&cli.log_level)?;
    match cli.command {
        Command::Generate(args) => execute_generate(args),
    }
}

fn execute_generate(args: GenerateArgs) -> Result<()> {
    let outcome = pipeline::generate_report(&args.input, &args.output)?;
    report_outcome(&outcome);

    if args.print_summary {
        println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
    }
    Ok(())
}

fn report_outcome(outcome: &RunSummary) {
    info!(
        raw_rows = outcome.raw_rows,
        skipped_rows = outcome.skipped_rows,
        clean_rows = outcome.clean_rows,
        regions = outcome.summary.rows.len(),
        grand_total = outcome.summary.grand_total(),
        "report complete"
    );
}

fn init_logging(level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(level).map_err(|error| ReportError::Logging(error.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ReportError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Clean a sales CSV export and write an Excel report."
)]
struct Cli {
    /// Log filter directive, e.g. `info` or `sales_report=debug`.
    #[arg(long, global = true, env = "SALES_REPORT_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clean the input file and write the two-sheet report.
    Generate(GenerateArgs),
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Sales CSV export to read.
    #[arg(long, default_value = "input_files/raw_sales_data.csv")]
    input: PathBuf,

    /// Destination of the xlsx report.
    #[arg(long, default_value = "output_reports/Executive_Sales_Report.xlsx")]
    output: PathBuf,

    /// Print the regional totals as JSON once the report is written.
    #[arg(long)]
    print_summary: bool,
}
