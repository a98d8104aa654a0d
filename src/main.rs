mod config;
mod discovery;
mod estimates;
mod report;

use clap::Parser;
use report::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;

/// Collect criterion benchmark estimates into a CSV table:
/// find `target/criterion` and `crates/*/target/criterion`, read the median
/// point estimate from every `estimates.json`, and print one row per file.
#[derive(Parser, Debug)]
#[command(name = "criterion-report", version, about)]
pub struct Cli {
    /// Directory to search from (displayed paths stay relative to it)
    #[arg(short = 'C', long, default_value = ".")]
    dir: PathBuf,

    /// TOML file overriding the result layout (roots, file name, anchor)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// Log discovered roots and skipped files to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "criterion_report=debug"
    } else {
        "criterion_report=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(?cli, "parsed CLI arguments");

    let cfg = match &cli.config {
        Some(path) => match config::load_config(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::error!(error = %e, "failed to load config");
                return ExitCode::FAILURE;
            }
        },
        None => config::ReportConfig::default(),
    };

    let report = match report::collect(&cli.dir, &cfg) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "result root discovery failed");
            return ExitCode::FAILURE;
        }
    };

    if report.roots == 0 {
        tracing::debug!(dir = %cli.dir.display(), "no result roots found");
    }

    let stdout = std::io::stdout().lock();
    if let Err(e) = report.render(stdout, cli.format) {
        // A closed pipe (e.g. `| head`) is not a failure.
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            tracing::error!(error = %e, "failed to write report");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
