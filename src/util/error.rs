// logslice - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors preserve the causal
// chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all logslice operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum SliceError {
    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// Extraction run failed mid-stream.
    Extract(ExtractError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for SliceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Extract(e) => write!(f, "Extraction error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for SliceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Extract(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading and validation.
///
/// All of these are rejected before the source or sink is touched; a
/// misconfigured run never produces partial output.
#[derive(Debug)]
pub enum ConfigError {
    /// The identity token is empty.
    EmptyIdentity,

    /// The window duration is zero or negative.
    WindowNotPositive { value: i64 },

    /// A required setting is absent after merging CLI flags and config file.
    MissingSetting { field: &'static str },

    /// TOML config file could not be parsed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading the config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyIdentity => {
                write!(f, "Identity token must not be empty")
            }
            Self::WindowNotPositive { value } => write!(
                f,
                "Window of {value} seconds is invalid; the window must be positive"
            ),
            Self::MissingSetting { field } => write!(
                f,
                "Required setting '{field}' was not provided on the command \
                 line or in config.toml"
            ),
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for SliceError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Extraction errors
// ---------------------------------------------------------------------------

/// Errors raised while streaming an extraction run.
///
/// Per-line anomalies (missing identity, missing or malformed timestamp)
/// are skip decisions, not errors, and never appear here. Only stream-level
/// I/O failures abort a run; sink contents written before the failure are
/// left in place (best-effort semantics).
#[derive(Debug)]
pub enum ExtractError {
    /// Invalid extraction parameters.
    Config(ConfigError),

    /// Reading the source stream failed.
    Read { source: io::Error },

    /// Writing the sink stream failed.
    Write { source: io::Error },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::Read { source } => write!(f, "Failed reading source: {source}"),
            Self::Write { source } => write!(f, "Failed writing sink: {source}"),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Read { source } => Some(source),
            Self::Write { source } => Some(source),
        }
    }
}

impl From<ExtractError> for SliceError {
    fn from(e: ExtractError) -> Self {
        // Parameter validation failures surface as configuration errors at
        // the top level so callers see one category for "rejected before I/O".
        match e {
            ExtractError::Config(c) => Self::Config(c),
            other => Self::Extract(other),
        }
    }
}

/// Convenience type alias for logslice results.
pub type Result<T> = std::result::Result<T, SliceError>;
