// LogSniff - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading (platform default or --config)
// 3. Logging initialisation (debug mode support)
// 4. Running the scan (or explaining one path) and writing results to stdout

use clap::{Parser, ValueEnum};
use logsniff::app::scan::{self, ScanRequest};
use logsniff::core::export::{self, OutputFormat};
use logsniff::platform::config::{self, PlatformPaths};
use logsniff::util;
use logsniff::util::error::LogSniffError;
use std::path::PathBuf;

/// Output encoding selectable on the command line.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum FormatArg {
    /// One path per line
    #[default]
    Text,
    /// JSON array of {path, matched_by}
    Json,
    /// CSV with a path,matched_by header
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

/// LogSniff - find files that are probably logs.
///
/// Walks a directory tree and reports every file that sits in a known log
/// location, has a log-like name, or looks like a recent text file.
#[derive(Parser, Debug)]
#[command(name = "logsniff", version, about)]
struct Cli {
    /// Directory to scan (defaults to [discovery] start_dir, then /var/log).
    /// With --explain, the single path to evaluate.
    path: Option<PathBuf>,

    /// Deepest directory level below PATH whose files are classified.
    #[arg(short = 'm', long = "max-depth")]
    max_depth: Option<usize>,

    /// Config file to use instead of the platform default.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,

    /// Classify files on a worker pool.
    #[arg(short = 'j', long = "parallel")]
    parallel: bool,

    /// Print the classification verdict for PATH instead of scanning.
    #[arg(short = 'e', long = "explain", requires = "path")]
    explain: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (app_config, config_warnings) = config::load_config(&config_path);

    util::logging::init(
        cli.debug,
        app_config.log_level.as_deref(),
        app_config.log_file.as_deref(),
    );

    tracing::debug!(
        version = util::constants::APP_VERSION,
        config = %config_path.display(),
        "LogSniff starting"
    );

    for warning in &config_warnings {
        tracing::warn!(error = %warning, "Configuration warning");
    }

    if let Err(e) = run(&cli, &app_config) {
        tracing::error!(error = %e, "LogSniff failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, app_config: &config::AppConfig) -> Result<(), LogSniffError> {
    if cli.explain {
        if let Some(ref path) = cli.path {
            let verdict = scan::explain(app_config, path)?;
            println!("{}: {verdict}", path.display());
        }
        return Ok(());
    }

    let request = ScanRequest::from_config(app_config, cli.path.clone(), cli.max_depth, cli.parallel);
    let report = scan::run_scan(app_config, &request)?;

    let stdout = std::io::stdout();
    export::export(cli.format.into(), &report.logs, stdout.lock(), "stdout")?;
    Ok(())
}
