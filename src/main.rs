// logslice - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. config.toml resolution and CLI merge
// 4. One extraction run and summary reporting

use clap::Parser;
use logslice::app::{self, config::CliOverrides};
use logslice::util;
use std::path::PathBuf;

/// logslice - identity-filtered, trailing-window log extraction.
///
/// Streams a log file once and writes every line that contains the given
/// identity token and carries an embedded YYYY-MM-DDTHH:MM:SS timestamp
/// within the trailing window, preserving source order.
#[derive(Parser, Debug)]
#[command(name = "logslice", version, about)]
struct Cli {
    /// Source log file (falls back to [extract] source in config.toml).
    source: Option<PathBuf>,

    /// Identity token lines must contain (exact, case-sensitive).
    #[arg(short = 'i', long = "identity")]
    identity: Option<String>,

    /// Output file (created, or truncated if it exists).
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Trailing window length in seconds (default 1200 = 20 minutes).
    #[arg(short = 'w', long = "window-seconds")]
    window_seconds: Option<i64>,

    /// Explicit config file path (default: platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print the run summary as JSON on stdout.
    #[arg(long = "json")]
    json: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Locate and read config.toml before logging init so the [logging]
    // level can participate in filter selection.
    let (config_path, explicit) = match cli.config {
        Some(ref path) => (Some(path.clone()), true),
        None => (app::config::default_config_path(), false),
    };

    let file_config = match config_path {
        Some(ref path) => app::config::load_config(path, explicit),
        None => Ok((Default::default(), Vec::new())),
    };

    let (file_config, config_warnings) = match file_config {
        Ok(loaded) => loaded,
        Err(e) => {
            util::logging::init(cli.debug, None);
            tracing::error!(error = %e, "Configuration failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    util::logging::init(cli.debug, file_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "logslice starting"
    );

    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    let overrides = CliOverrides {
        identity: cli.identity,
        source: cli.source,
        sink: cli.output,
        window_seconds: cli.window_seconds,
    };

    let run_config = match app::config::resolve(overrides, file_config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Configuration failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match app::run::run(&run_config) {
        Ok(summary) => {
            if cli.json {
                // stdout carries the machine-readable summary only;
                // diagnostics stay on stderr.
                match serde_json::to_string_pretty(&summary) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to serialise summary");
                        eprintln!("Error: failed to serialise summary: {e}");
                        std::process::exit(1);
                    }
                }
            } else {
                println!(
                    "Wrote {} of {} lines for identity '{}' (last {} s) to '{}'",
                    summary.lines_written,
                    summary.lines_scanned,
                    summary.identity,
                    summary.window_seconds,
                    summary.sink.display()
                );
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
