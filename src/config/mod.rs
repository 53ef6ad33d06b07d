//! Configuration management.
//!
//! Configuration is a plain value loaded once at startup and passed to the
//! store and service constructors. Sources, lowest precedence first:
//! built-in defaults, a TOML file, then `TELEDIGEST_*` environment variables.

use crate::models::KeywordSet;
use crate::services::DEFAULT_MAX_DOCS;
use crate::storage::StoreOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding [`DigestConfig::db_path`].
pub const ENV_DB_PATH: &str = "TELEDIGEST_DB_PATH";
/// Environment variable overriding [`DigestConfig::rag_keywords`] (comma separated).
pub const ENV_RAG_KEYWORDS: &str = "TELEDIGEST_RAG_KEYWORDS";
/// Environment variable overriding [`DigestConfig::max_docs`].
pub const ENV_MAX_DOCS: &str = "TELEDIGEST_MAX_DOCS";

/// Built-in relevance topics: war, defence, economy and diplomacy terms in
/// Ukrainian, Russian and English. Used when no config source sets
/// `rag_keywords`; an explicit empty list turns filtering off.
pub const DEFAULT_RAG_KEYWORDS: &[&str] = &[
    // Ukrainian
    "війна", "наступ*", "контрнаступ*", "фронт", "лінія", "оборон*", "штурм*",
    "артилер*", "обстріл*", "удар*", "ракета*", "безпілотн*", "дрон*", "ППО",
    "мобілізац*", "призов*", "резерв*", "втрат*", "збройн*", "ЗСУ", "Сили",
    "Оборони", "Генштаб", "Міноборони", "санкц*", "економік*", "енергетик*",
    "ринок*", "бюджет*", "НАТО", "ЄС", "Європейськ*", "допомог*", "підтримк*",
    "переговор*", "дипломат*", "Зеленськ*", "Умеров", "Умєров",
    // Russian
    "войн*", "наступлен*", "линия", "артилл*", "обстрел*", "ракет*",
    "беспилотн*", "ПВО", "мобилизац*", "призыв", "потерь", "армия", "ВСУ",
    "Минобороны", "экономик*", "энергетик*", "рынок*", "ЕС", "Европейск*", "помощ*",
    "поддержк*", "Зеленск*",
    // English
    "war", "offensive", "counteroffensive", "front", "frontline", "defense",
    "assault", "artillery", "shell*", "strike*", "attack*", "missile*", "drone*",
    "UAV", "air", "mobilization", "draft", "reserve", "casualties", "military",
    "armed", "forces", "sanctions", "economy", "energy", "market", "budget",
    "NATO", "EU", "European", "aid", "support", "negotiations", "diplomacy",
    "Zelensky", "Zelenskiy", "Zelenskyy", "Umerov",
];

const APP_DIR: &str = "teledigest";
const DEFAULT_DB_FILE: &str = "teledigest.db";

/// Main configuration for teledigest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestConfig {
    /// Path to the `SQLite` database file.
    pub db_path: PathBuf,
    /// Raw relevance keywords; a trailing `*` marks a prefix term.
    pub rag_keywords: Vec<String>,
    /// Row cap for relevance queries and their fallback.
    pub max_docs: usize,
    /// Whether to maintain the full-text mirror.
    pub full_text: bool,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Logging section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `teledigest=debug`.
    pub level: Option<String>,
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Database path.
    pub db_path: Option<String>,
    /// Relevance keywords.
    pub rag_keywords: Option<Vec<String>>,
    /// Relevance row cap.
    pub max_docs: Option<usize>,
    /// Full-text mirror toggle.
    pub full_text: Option<bool>,
    /// Logging section.
    pub logging: Option<LoggingSettings>,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            rag_keywords: DEFAULT_RAG_KEYWORDS.iter().map(ToString::to_string).collect(),
            max_docs: DEFAULT_MAX_DOCS,
            full_text: true,
            logging: LoggingSettings::default(),
        }
    }
}

impl DigestConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from `path` if given, else from the default
    /// location, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load_default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid config file.
    pub fn from_toml(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Reads `teledigest/config.toml` under the platform config dir
    /// (`~/.config` on Linux, `~/Library/Application Support` on macOS).
    /// Returns defaults if the file is missing or unreadable.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let path = base_dirs.config_dir().join(APP_DIR).join("config.toml");
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config file");
                Self::default()
            },
        }
    }

    /// Converts a `ConfigFile` to `DigestConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(db_path) = file.db_path {
            config.db_path = PathBuf::from(db_path);
        }
        if let Some(keywords) = file.rag_keywords {
            config.rag_keywords = keywords;
        }
        if let Some(max_docs) = file.max_docs {
            config.max_docs = max_docs;
        }
        if let Some(full_text) = file.full_text {
            config.full_text = full_text;
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }

    /// Applies `TELEDIGEST_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides read through `lookup`.
    ///
    /// Blank values are ignored; an unparsable `TELEDIGEST_MAX_DOCS` is
    /// logged and ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(db_path) = get(ENV_DB_PATH) {
            self.db_path = PathBuf::from(db_path.trim());
        }
        if let Some(keywords) = get(ENV_RAG_KEYWORDS) {
            self.rag_keywords = keywords
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(ToString::to_string)
                .collect();
        }
        if let Some(max_docs) = get(ENV_MAX_DOCS) {
            match max_docs.trim().parse::<usize>() {
                Ok(value) => self.max_docs = value,
                Err(e) => tracing::warn!(
                    value = %max_docs,
                    error = %e,
                    "Ignoring invalid {ENV_MAX_DOCS}"
                ),
            }
        }
    }

    /// Sets the database path.
    #[must_use]
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    /// Parsed relevance keywords.
    #[must_use]
    pub fn keywords(&self) -> KeywordSet {
        KeywordSet::parse(&self.rag_keywords)
    }

    /// Store options derived from this configuration.
    #[must_use]
    pub const fn store_options(&self) -> StoreOptions {
        StoreOptions {
            full_text: self.full_text,
        }
    }
}

/// Default database location: `teledigest/teledigest.db` in the platform
/// data dir, or the working directory if there is none.
#[must_use]
pub fn default_db_path() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from(DEFAULT_DB_FILE),
        |dirs| dirs.data_dir().join(APP_DIR).join(DEFAULT_DB_FILE),
    )
}
