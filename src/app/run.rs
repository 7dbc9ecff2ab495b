// logslice - app/run.rs
//
// Run orchestration: opens the source and sink files, captures the
// evaluation instant, drives the core extractor, and produces the run
// summary. This is the only place extraction touches the filesystem.

use crate::app::config::RunConfig;
use crate::core::extract::{self, ExtractParams, ExtractStats};
use crate::util::error::{Result, SliceError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// Serialisable summary of one completed run, for the human one-liner
/// and the `--json` machine output.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Identity token the run filtered on.
    pub identity: String,

    /// Trailing window length in seconds.
    pub window_seconds: i64,

    /// Evaluation instant ("now") for the whole run, RFC 3339.
    pub evaluated_at: DateTime<Utc>,

    /// Source log file.
    pub source: PathBuf,

    /// Output file.
    pub sink: PathBuf,

    /// Total lines read from the source.
    pub lines_scanned: u64,

    /// Lines containing the identity token.
    pub identity_matches: u64,

    /// Lines written to the sink.
    pub lines_written: u64,

    /// Identity matches without a parseable timestamp.
    pub skipped_no_timestamp: u64,

    /// Identity matches outside the window (too old or in the future).
    pub skipped_out_of_window: u64,
}

impl RunSummary {
    fn new(config: &RunConfig, now: DateTime<Utc>, stats: ExtractStats) -> Self {
        Self {
            identity: config.identity.clone(),
            window_seconds: config.window_seconds,
            evaluated_at: now,
            source: config.source.clone(),
            sink: config.sink.clone(),
            lines_scanned: stats.lines_scanned,
            identity_matches: stats.identity_matches,
            lines_written: stats.lines_written,
            skipped_no_timestamp: stats.no_timestamp,
            skipped_out_of_window: stats.out_of_window,
        }
    }
}

/// Execute one extraction run with `now` captured at call time.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    run_at(config, Utc::now())
}

/// Execute one extraction run against an injected evaluation instant.
///
/// The sink is created if absent and truncated if present (fresh-report
/// semantic). Both file handles are scoped to this function, so they are
/// released on every exit path, including mid-run I/O failures; sink
/// content written before a failure stays on disk.
pub fn run_at(config: &RunConfig, now: DateTime<Utc>) -> Result<RunSummary> {
    let params = ExtractParams {
        identity: config.identity.clone(),
        window_seconds: config.window_seconds,
    };
    // Reject bad parameters before creating (and truncating) the sink.
    params.validate()?;

    tracing::info!(
        identity = %params.identity,
        window_seconds = params.window_seconds,
        source = %config.source.display(),
        sink = %config.sink.display(),
        "Run starting"
    );

    let source = File::open(&config.source).map_err(|e| SliceError::Io {
        path: config.source.clone(),
        operation: "open source",
        source: e,
    })?;

    let sink = File::create(&config.sink).map_err(|e| SliceError::Io {
        path: config.sink.clone(),
        operation: "create sink",
        source: e,
    })?;

    let stats = extract::extract(BufReader::new(source), BufWriter::new(sink), &params, now)?;

    let summary = RunSummary::new(config, now, stats);
    tracing::info!(
        scanned = summary.lines_scanned,
        matched = summary.identity_matches,
        written = summary.lines_written,
        "Run complete"
    );

    Ok(summary)
}
