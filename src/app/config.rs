// logslice - app/config.rs
//
// config.toml loading with startup validation, plus merging of CLI
// overrides. The original workflow hardcoded the identity token, file
// paths, and window length; here they are explicit settings with the
// precedence: CLI flag > config.toml > built-in default.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance when locating config.toml.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[extract]` section.
    pub extract: ExtractSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[extract]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExtractSection {
    /// Identity token lines must contain.
    pub identity: Option<String>,
    /// Source log file path.
    pub source: Option<String>,
    /// Sink (output) file path.
    pub sink: Option<String>,
    /// Trailing window length in seconds.
    pub window_seconds: Option<i64>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Partially-resolved configuration after reading config.toml but before
/// CLI overrides. Out-of-range values have already been replaced with
/// defaults, with a warning recorded.
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    pub identity: Option<String>,
    pub source: Option<PathBuf>,
    pub sink: Option<PathBuf>,
    pub window_seconds: Option<i64>,
    pub log_level: Option<String>,
}

/// Fully-resolved settings for one run. Produced by [`resolve`]; every
/// field is present and validated.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub identity: String,
    pub source: PathBuf,
    pub sink: PathBuf,
    pub window_seconds: i64,
}

/// Locate the platform config.toml (e.g. ~/.config/logslice/config.toml).
///
/// Returns `None` when platform directories cannot be determined; the
/// tool then runs on CLI flags and defaults alone.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", constants::APP_ID)
        .map(|dirs| dirs.config_dir().join(constants::CONFIG_FILE_NAME))
}

/// Load and pre-validate `config.toml` from `path`.
///
/// A missing file is the normal first-run case and yields defaults with
/// no warnings. An unreadable or unparseable file is a hard error only
/// when the user pointed at it explicitly (`explicit`); an implicit
/// platform-path file that fails to parse produces a warning and
/// defaults, so a stale config never blocks an otherwise-valid run.
///
/// Warnings are returned to the caller, which emits each exactly once.
pub fn load_config(
    path: &Path,
    explicit: bool,
) -> Result<(FileConfig, Vec<String>), ConfigError> {
    let mut warnings: Vec<String> = Vec::new();

    if !path.exists() {
        if explicit {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "config file not found",
                ),
            });
        }
        tracing::debug!(path = %path.display(), "No config.toml found; using defaults");
        return Ok((FileConfig::default(), warnings));
    }

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            if explicit {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
            // Pushed, not logged: the caller owns warning emission so each
            // message appears on stderr exactly once.
            warnings.push(format!(
                "Could not read config file '{}': {e}. Using defaults.",
                path.display()
            ));
            return Ok((FileConfig::default(), warnings));
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            if explicit {
                return Err(ConfigError::TomlParse {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
            warnings.push(format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                path.display()
            ));
            return Ok((FileConfig::default(), warnings));
        }
    };

    tracing::info!(path = %path.display(), "Loaded config.toml");

    let mut config = FileConfig {
        identity: raw.extract.identity.filter(|s| !s.is_empty()),
        source: raw.extract.source.map(PathBuf::from),
        sink: raw.extract.sink.map(PathBuf::from),
        window_seconds: None,
        log_level: None,
    };

    // -- Extract: window_seconds --
    if let Some(secs) = raw.extract.window_seconds {
        if secs >= constants::MIN_WINDOW_SECONDS {
            config.window_seconds = Some(secs);
        } else {
            warnings.push(format!(
                "[extract] window_seconds = {secs} is not positive. Using default ({}).",
                constants::DEFAULT_WINDOW_SECONDS,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    Ok((config, warnings))
}

/// CLI-provided overrides, all optional.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub identity: Option<String>,
    pub source: Option<PathBuf>,
    pub sink: Option<PathBuf>,
    pub window_seconds: Option<i64>,
}

/// Merge CLI overrides over file config and defaults into a complete,
/// validated [`RunConfig`].
///
/// Identity and source have no sane defaults and must come from one of
/// the two layers; the sink falls back to `slice.out.log` in the current
/// directory. The window falls back to 20 minutes. A CLI-supplied window
/// is checked for positivity here (the file layer checks its own copy).
pub fn resolve(cli: CliOverrides, file: FileConfig) -> Result<RunConfig, ConfigError> {
    let identity = cli
        .identity
        .or(file.identity)
        .ok_or(ConfigError::MissingSetting { field: "identity" })?;
    if identity.is_empty() {
        return Err(ConfigError::EmptyIdentity);
    }

    let source = cli
        .source
        .or(file.source)
        .ok_or(ConfigError::MissingSetting { field: "source" })?;

    let sink = cli
        .sink
        .or(file.sink)
        .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_SINK_FILE));

    let window_seconds = cli
        .window_seconds
        .or(file.window_seconds)
        .unwrap_or(constants::DEFAULT_WINDOW_SECONDS);
    if window_seconds < constants::MIN_WINDOW_SECONDS {
        return Err(ConfigError::WindowNotPositive {
            value: window_seconds,
        });
    }

    Ok(RunConfig {
        identity,
        source,
        sink,
        window_seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let (config, warnings) =
            load_config(Path::new("/nonexistent/logslice-test/config.toml"), false).unwrap();
        assert!(config.identity.is_none());
        assert!(config.window_seconds.is_none());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = load_config(Path::new("/nonexistent/logslice-test/config.toml"), true);
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_full_config_parses() {
        let f = write_config(
            r#"
[extract]
identity = "79084634603"
source = "logs.log"
sink = "out.log"
window_seconds = 600

[logging]
level = "debug"
"#,
        );
        let (config, warnings) = load_config(f.path(), true).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(config.identity.as_deref(), Some("79084634603"));
        assert_eq!(config.source, Some(PathBuf::from("logs.log")));
        assert_eq!(config.sink, Some(PathBuf::from("out.log")));
        assert_eq!(config.window_seconds, Some(600));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_non_positive_window_warns_and_falls_back() {
        let f = write_config("[extract]\nwindow_seconds = 0\n");
        let (config, warnings) = load_config(f.path(), true).unwrap();
        assert!(config.window_seconds.is_none());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("window_seconds"));
    }

    /// Any positive window is accepted from the file layer; there is no
    /// upper cap that could silently replace a long window with the default.
    #[test]
    fn test_large_positive_window_accepted_from_file() {
        let f = write_config("[extract]\nwindow_seconds = 2678400\n"); // 31 days
        let (config, warnings) = load_config(f.path(), true).unwrap();
        assert_eq!(config.window_seconds, Some(2_678_400));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let f = write_config("[extract]\nidentity = \"x\"\nfuture_option = true\n[surprise]\na = 1\n");
        let (config, warnings) = load_config(f.path(), true).unwrap();
        assert_eq!(config.identity.as_deref(), Some("x"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_invalid_log_level_warns() {
        let f = write_config("[logging]\nlevel = \"loud\"\n");
        let (config, warnings) = load_config(f.path(), true).unwrap();
        assert!(config.log_level.is_none());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_implicit_unparseable_file_warns_and_defaults() {
        let f = write_config("not toml at all [[[");
        let (config, warnings) = load_config(f.path(), false).unwrap();
        assert!(config.identity.is_none());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_explicit_unparseable_file_is_an_error() {
        let f = write_config("not toml at all [[[");
        let result = load_config(f.path(), true);
        assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
    }

    // -------------------------------------------------------------------------
    // resolve(): precedence and required settings
    // -------------------------------------------------------------------------

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig {
            identity: Some("from-file".into()),
            source: Some(PathBuf::from("file.log")),
            sink: Some(PathBuf::from("file-out.log")),
            window_seconds: Some(600),
            log_level: None,
        };
        let cli = CliOverrides {
            identity: Some("from-cli".into()),
            window_seconds: Some(60),
            ..Default::default()
        };
        let run = resolve(cli, file).unwrap();
        assert_eq!(run.identity, "from-cli");
        assert_eq!(run.window_seconds, 60);
        // Fields without a CLI override keep the file values.
        assert_eq!(run.source, PathBuf::from("file.log"));
        assert_eq!(run.sink, PathBuf::from("file-out.log"));
    }

    #[test]
    fn test_missing_identity_is_an_error() {
        let cli = CliOverrides {
            source: Some(PathBuf::from("logs.log")),
            ..Default::default()
        };
        let result = resolve(cli, FileConfig::default());
        assert!(matches!(
            result,
            Err(ConfigError::MissingSetting { field: "identity" })
        ));
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let cli = CliOverrides {
            identity: Some("x".into()),
            ..Default::default()
        };
        let result = resolve(cli, FileConfig::default());
        assert!(matches!(
            result,
            Err(ConfigError::MissingSetting { field: "source" })
        ));
    }

    #[test]
    fn test_defaults_applied_for_sink_and_window() {
        let cli = CliOverrides {
            identity: Some("x".into()),
            source: Some(PathBuf::from("logs.log")),
            ..Default::default()
        };
        let run = resolve(cli, FileConfig::default()).unwrap();
        assert_eq!(run.sink, PathBuf::from(constants::DEFAULT_SINK_FILE));
        assert_eq!(run.window_seconds, constants::DEFAULT_WINDOW_SECONDS);
    }

    #[test]
    fn test_cli_non_positive_window_rejected() {
        let cli = CliOverrides {
            identity: Some("x".into()),
            source: Some(PathBuf::from("logs.log")),
            window_seconds: Some(-5),
            ..Default::default()
        };
        let result = resolve(cli, FileConfig::default());
        assert!(matches!(
            result,
            Err(ConfigError::WindowNotPositive { value: -5 })
        ));
    }
}
