//! Environment settings and logger setup.

use std::fs::File;
use std::path::PathBuf;
use std::str::FromStr;

use simplelog::ColorChoice;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::TermLogger;
use simplelog::TerminalMode;
use simplelog::WriteLogger;

pub const LOG_LEVEL_VAR: &str = "MODDASH_LOG";
pub const LOG_FILE_VAR: &str = "MODDASH_LOG_FILE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no backend URL: set MODDASH_URL, pass --url, or use --demo")]
    MissingUrl,

    #[error("no API key: set MODDASH_API_KEY or pass --api-key")]
    MissingApiKey,

    #[error("invalid log level '{0}' (expected off, error, warn, info, debug or trace)")]
    InvalidLogLevel(String),

    #[error("cannot create log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Where log records go and at which level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: LevelFilter,
    /// Log to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LevelFilter::Warn,
            file: None,
        }
    }
}

impl LogSettings {
    /// Reads `MODDASH_LOG` and `MODDASH_LOG_FILE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var(LOG_LEVEL_VAR).ok(),
            std::env::var_os(LOG_FILE_VAR).map(PathBuf::from),
        )
    }

    fn from_vars(level: Option<String>, file: Option<PathBuf>) -> Result<Self, ConfigError> {
        let level = match level.as_deref().map(str::trim) {
            None | Some("") => LevelFilter::Warn,
            Some(value) => LevelFilter::from_str(value)
                .map_err(|_| ConfigError::InvalidLogLevel(value.to_string()))?,
        };
        let file = file.filter(|path| !path.as_os_str().is_empty());
        Ok(Self { level, file })
    }

    /// Installs the global logger. Can only succeed once per process.
    pub fn init(&self) -> Result<(), ConfigError> {
        match &self.file {
            Some(path) => {
                let file = File::create(path).map_err(|source| ConfigError::LogFile {
                    path: path.clone(),
                    source,
                })?;
                WriteLogger::init(self.level, Config::default(), file)?;
            }
            None => TermLogger::init(
                self.level,
                Config::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            )?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_warn_on_stderr() {
        let settings = LogSettings::from_vars(None, None).unwrap();
        assert_eq!(settings, LogSettings::default());
    }

    #[test]
    fn test_level_is_case_insensitive() {
        let settings = LogSettings::from_vars(Some("DEBUG".into()), None).unwrap();
        assert_eq!(settings.level, LevelFilter::Debug);
    }

    #[test]
    fn test_blank_values_fall_back() {
        let settings = LogSettings::from_vars(Some("  ".into()), Some(PathBuf::new())).unwrap();
        assert_eq!(settings.level, LevelFilter::Warn);
        assert_eq!(settings.file, None);
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let err = LogSettings::from_vars(Some("loud".into()), None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(ref level) if level == "loud"));
    }

    #[test]
    fn test_log_file_is_kept() {
        let settings =
            LogSettings::from_vars(Some("info".into()), Some("moddash.log".into())).unwrap();
        assert_eq!(settings.file, Some(PathBuf::from("moddash.log")));
    }
}
