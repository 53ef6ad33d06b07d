//! Structured logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;

/// Environment variable holding a `tracing` filter directive.
pub const ENV_LOG_FILTER: &str = "TELEDIGEST_LOG";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name; anything but `json` is pretty.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// `EnvFilter` directive.
    pub filter: String,
    /// Optional log file (appended); stderr otherwise.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Builds logging configuration from config settings with env overrides.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        Self::from_settings_with(settings, verbose, std::env::var(ENV_LOG_FILTER).ok())
    }

    /// Same as [`LoggingConfig::from_settings`] with the env filter passed in.
    ///
    /// Filter precedence: `env_filter`, then `settings.level`, then `debug`
    /// when verbose or `info` otherwise.
    #[must_use]
    pub fn from_settings_with(
        settings: Option<&LoggingSettings>,
        verbose: bool,
        env_filter: Option<String>,
    ) -> Self {
        let fallback = if verbose { "debug" } else { "info" };
        let filter = env_filter
            .filter(|f| !f.trim().is_empty())
            .or_else(|| settings.and_then(|s| s.level.clone()))
            .unwrap_or_else(|| fallback.to_string());
        let format = settings
            .and_then(|s| s.format.as_deref())
            .map(LogFormat::parse)
            .unwrap_or_default();
        let file = settings.and_then(|s| s.file.clone());

        Self {
            format,
            filter,
            file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("json", LogFormat::Json; "json")]
    #[test_case(" JSON ", LogFormat::Json; "json uppercase")]
    #[test_case("pretty", LogFormat::Pretty; "pretty")]
    #[test_case("xml", LogFormat::Pretty; "unknown")]
    fn test_log_format_parse(input: &str, expected: LogFormat) {
        assert_eq!(LogFormat::parse(input), expected);
    }

    #[test]
    fn test_defaults_without_settings() {
        let config = LoggingConfig::from_settings_with(None, false, None);
        assert_eq!(config, LoggingConfig::default());

        let verbose = LoggingConfig::from_settings_with(None, true, None);
        assert_eq!(verbose.filter, "debug");
    }

    #[test]
    fn test_filter_precedence() {
        let settings = LoggingSettings {
            level: Some("warn".to_string()),
            format: Some("json".to_string()),
            file: Some(PathBuf::from("/var/log/teledigest.log")),
        };

        let config = LoggingConfig::from_settings_with(Some(&settings), true, None);
        assert_eq!(config.filter, "warn");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file, Some(PathBuf::from("/var/log/teledigest.log")));

        let config = LoggingConfig::from_settings_with(
            Some(&settings),
            false,
            Some("teledigest=trace".to_string()),
        );
        assert_eq!(config.filter, "teledigest=trace");

        let config = LoggingConfig::from_settings_with(Some(&settings), false, Some(" ".to_string()));
        assert_eq!(config.filter, "warn");
    }
}
