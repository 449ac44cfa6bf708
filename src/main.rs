//! junit-report: HTML reports from JUnit XML result files

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use junit_report::config::{load_config, result_filter};
use junit_report::model::TestResults;
use junit_report::reporter::ConsoleReporter;
use junit_report::ReportGenerator;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

/// Generate a static HTML report from a directory of JUnit XML result files
#[derive(Parser, Debug)]
#[command(name = "junit-report")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing the result files
    results_dir: PathBuf,

    /// Directory the report is written to
    #[arg(long, short, default_value = "test-report")]
    output: PathBuf,

    /// Glob selecting result files (default: TEST-*.xml)
    #[arg(long)]
    pattern: Option<String>,

    /// Title prefix of every page (default: "Test results")
    #[arg(long)]
    title: Option<String>,

    /// Path to config file (default: search .junitreportrc.json in the results dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Exit 1 when any test failed
    #[arg(long)]
    fail_on_failure: bool,

    /// Quiet mode (no summary)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("JUNIT_REPORT_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<ExitCode> {
    let work_dir = std::env::current_dir().context("Failed to read current directory")?;
    let search_dir = if args.results_dir.is_dir() {
        args.results_dir.clone()
    } else {
        work_dir.clone()
    };

    let config = match &args.config {
        Some(path) => load_config(&work_dir, Some(path.as_path()))?,
        None => load_config(&search_dir, None)?,
    }
    .merge_with_cli(args.pattern, args.title, args.fail_on_failure);

    let generator = ReportGenerator::new(&args.results_dir, &args.output)
        .with_filter(result_filter(&config)?)
        .with_options(config.render_options());

    let results = generator.generate()?;

    if !args.quiet {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }
        reporter.report(&results, &generator.index_path());
    }

    if config.fail_on_failure() && results.has_failures() {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}
