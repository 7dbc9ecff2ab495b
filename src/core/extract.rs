// logslice - core/extract.rs
//
// The extraction engine: stream a line-oriented source once, keep lines
// that contain the identity token and whose embedded timestamp falls
// inside the trailing window, and write them verbatim to the sink in
// source order.
//
// Core layer: accepts BufRead/Write trait objects, never touches the
// filesystem directly. No state survives a run; two runs with the same
// source, parameters, and evaluation instant produce identical output.

use crate::core::timestamp;
use crate::util::constants;
use crate::util::error::{ConfigError, ExtractError};
use chrono::{DateTime, TimeDelta, Utc};
use std::io::{BufRead, Write};

/// Parameters for a single extraction run.
#[derive(Debug, Clone)]
pub struct ExtractParams {
    /// Exact substring a line must contain to be eligible for timestamp
    /// evaluation. Case-sensitive, no normalisation.
    pub identity: String,

    /// Trailing window length in seconds. A line is in-window when its
    /// timestamp is between `now - window_seconds` and `now`, inclusive
    /// of both bounds.
    pub window_seconds: i64,
}

impl ExtractParams {
    /// Validate parameters before any I/O is performed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.identity.is_empty() {
            return Err(ConfigError::EmptyIdentity);
        }
        if self.window_seconds < constants::MIN_WINDOW_SECONDS {
            return Err(ConfigError::WindowNotPositive {
                value: self.window_seconds,
            });
        }
        Ok(())
    }
}

/// Counters describing one completed extraction run.
///
/// The skip counters exist because per-line anomalies never raise errors;
/// they are the only visible trace of discarded lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Total lines read from the source.
    pub lines_scanned: u64,

    /// Lines containing the identity token (whether or not in-window).
    pub identity_matches: u64,

    /// Identity matches discarded because no timestamp shape was found
    /// or the matched shape was not a valid instant.
    pub no_timestamp: u64,

    /// Identity matches discarded because the timestamp fell outside the
    /// trailing window (too old, or in the future relative to `now`).
    pub out_of_window: u64,

    /// Lines written to the sink.
    pub lines_written: u64,
}

/// Run one extraction pass over `source`, appending in-window matches
/// to `sink` verbatim (original line terminators included).
///
/// `now` is the evaluation instant for the whole run: it is captured
/// once by the caller and never re-read per line, so two lines with the
/// same timestamp always receive the same in/out decision. Injecting it
/// makes runs deterministic under test.
///
/// Per-line decision sequence:
///   1. Identity containment test (cheap short-circuit; no timestamp
///      work for non-matching lines).
///   2. First `YYYY-MM-DDTHH:MM:SS` substring located and parsed as
///      naive UTC. Absent or malformed -> line skipped, run continues.
///   3. In-window iff `0 <= now - t <= window_seconds`. Future-stamped
///      lines are excluded: the window trails, it is not symmetric.
///
/// Only stream-level failures abort the run: an unreadable source or an
/// unwritable sink. Anything already written stays written.
pub fn extract<R: BufRead, W: Write>(
    mut source: R,
    mut sink: W,
    params: &ExtractParams,
    now: DateTime<Utc>,
) -> Result<ExtractStats, ExtractError> {
    params.validate().map_err(ExtractError::Config)?;

    let window = TimeDelta::seconds(params.window_seconds);
    let mut stats = ExtractStats::default();
    let mut line = String::new();

    tracing::debug!(
        identity = %params.identity,
        window_seconds = params.window_seconds,
        now = %now.format(constants::TIMESTAMP_FORMAT),
        "Extraction started"
    );

    loop {
        line.clear();
        let bytes_read = source
            .read_line(&mut line)
            .map_err(|e| ExtractError::Read { source: e })?;
        if bytes_read == 0 {
            break;
        }
        stats.lines_scanned += 1;

        // Identity gate first: no timestamp work for foreign lines.
        if !line.contains(&params.identity) {
            continue;
        }
        stats.identity_matches += 1;

        let ts = match timestamp::find_timestamp(&line) {
            Some(ts) => ts,
            None => {
                stats.no_timestamp += 1;
                tracing::trace!(
                    line_number = stats.lines_scanned,
                    preview = preview(&line),
                    "Identity match without parseable timestamp; skipped"
                );
                continue;
            }
        };

        // Signed comparison on the full-precision delta: a timestamp even
        // fractionally ahead of `now` counts as future and is excluded.
        let elapsed = now.signed_duration_since(ts);
        if elapsed < TimeDelta::zero() || elapsed > window {
            stats.out_of_window += 1;
            continue;
        }

        // Verbatim append, terminator and all.
        sink.write_all(line.as_bytes())
            .map_err(|e| ExtractError::Write { source: e })?;
        stats.lines_written += 1;
    }

    sink.flush().map_err(|e| ExtractError::Write { source: e })?;

    tracing::debug!(
        scanned = stats.lines_scanned,
        matched = stats.identity_matches,
        written = stats.lines_written,
        no_timestamp = stats.no_timestamp,
        out_of_window = stats.out_of_window,
        "Extraction complete"
    );

    Ok(stats)
}

/// Truncated line preview for trace output.
fn preview(line: &str) -> &str {
    let end = line
        .char_indices()
        .take(constants::DEBUG_MAX_LINE_PREVIEW)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    line[..end].trim_end()
}
