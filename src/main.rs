//! depscope - npm dependency health report CLI tool
//!
//! Reads a package.json, asks the npm registry about every declared
//! dependency and reports which are outdated, deprecated or pre-release.

use clap::Parser;
use depscope::cli::CliArgs;
use depscope::manifest::read_manifest;
use depscope::orchestrator::Orchestrator;
use depscope::output::{create_formatter, OutputConfig};
use depscope::progress::Progress;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit status when the analysis finished but some fetches failed
const EXIT_PARTIAL: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    args.validate()?;
    let config = args.analyzer_config()?;

    // Manifest problems are fatal and reported before any network activity
    let manifest = read_manifest(&args.path)?;
    let declarations = args.declaration_filter().apply(manifest.declarations());
    debug!(
        path = %args.path.display(),
        declared = manifest.len(),
        selected = declarations.len(),
        registry = %config.registry_url,
        "manifest loaded"
    );

    let orchestrator = Orchestrator::new(&config)?;

    let mut progress = Progress::new(args.show_progress());
    progress.start(declarations.len() as u64, "Checking dependencies");
    let outcome = orchestrator
        .analyze_with_progress(&declarations, |completed, total| {
            progress.update(completed, total);
            Ok(())
        })
        .await;
    progress.finish_and_clear();
    let result = outcome?;

    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    let summary = result.summary();
    if result.has_fetch_failures() {
        Ok(ExitCode::from(EXIT_PARTIAL))
    } else if args.strict && (summary.outdated > 0 || summary.deprecated > 0) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
