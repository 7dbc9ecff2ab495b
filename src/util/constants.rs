// logslice - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "logslice";

/// Application identifier used for config directories.
pub const APP_ID: &str = "logslice";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Extraction window
// =============================================================================

/// Default trailing window in seconds (20 minutes).
pub const DEFAULT_WINDOW_SECONDS: i64 = 1_200;

/// Minimum configurable window. The window must be positive; a zero or
/// negative window is a configuration error. There is no upper bound: a
/// very long window simply degenerates into "the whole file".
pub const MIN_WINDOW_SECONDS: i64 = 1;

// =============================================================================
// Timestamp pattern
// =============================================================================

/// Regex locating the fixed embedded timestamp shape inside a log line:
/// four-digit year, two-digit month/day, literal 'T', two-digit
/// hour/minute/second. The first match on the line wins.
pub const TIMESTAMP_PATTERN: &str = r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}";

/// chrono format string matching TIMESTAMP_PATTERN exactly.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// =============================================================================
// Output
// =============================================================================

/// Default sink file name when neither config nor CLI provide one.
pub const DEFAULT_SINK_FILE: &str = "slice.out.log";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of a log line echoed in debug/trace output.
/// Prevents accidental exposure of long sensitive lines in diagnostics.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
