//! Configuration management for gatelab.
//!
//! Settings come from figment: built-in defaults, then an optional TOML
//! file, then `GATELAB_` environment variables.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::format::OutputFormat;
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "gatelab";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "states.db";

/// Environment variable prefix. Nested keys use `__`, as in
/// `GATELAB_SESSION__AUTOSAVE_DELAY_MS`.
const ENV_PREFIX: &str = "GATELAB_";

/// Largest truth table the config may allow, in inputs.
pub const MAX_TABLE_INPUTS_LIMIT: usize = 12;

/// Application configuration.
///
/// Precedence, highest first:
/// 1. Environment variables (`GATELAB_`)
/// 2. TOML config file at `~/.config/gatelab/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Interactive session configuration.
    pub session: SessionConfig,
    /// Output configuration.
    pub display: DisplayConfig,
}

/// Where and how long states are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/gatelab/states.db`
    pub database_path: Option<PathBuf>,
    /// Maximum number of states to retain. 0 means unlimited.
    pub max_states: usize,
    /// Maximum age of states in days. 0 means unlimited.
    pub max_age_days: u32,
}

/// Interactive session behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Save state automatically after changes.
    pub autosave: bool,
    /// Quiet period before an autosave write, in milliseconds.
    pub autosave_delay_ms: u64,
    /// Resume from the last saved state of the circuit.
    pub restore_last_state: bool,
}

/// How results are printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Default output format.
    pub format: OutputFormat,
    /// Print Boolean equations with evaluations.
    pub show_equations: bool,
    /// Refuse to enumerate truth tables with more inputs than this.
    pub max_table_inputs: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            max_states: 10_000,
            max_age_days: 90,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            autosave: true,
            autosave_delay_ms: 500,
            restore_last_state: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Plain,
            show_equations: true,
            max_table_inputs: crate::truth_table::DEFAULT_MAX_INPUTS,
        }
    }
}

impl Config {
    /// Load configuration from `config_path`, or from the default location
    /// when `None`.
    ///
    /// A missing file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let config: Self = Self::figment(config_file).extract()?;
        config.validate()?;
        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    fn figment(config_file: PathBuf) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] for the first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.session.autosave_delay_ms == 0 {
            return Err(Error::ConfigValidation {
                message: "autosave_delay_ms must be greater than 0".to_string(),
            });
        }

        if !(1..=MAX_TABLE_INPUTS_LIMIT).contains(&self.display.max_table_inputs) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "max_table_inputs ({}) must be between 1 and {MAX_TABLE_INPUTS_LIMIT}",
                    self.display.max_table_inputs
                ),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the autosave delay as a Duration.
    #[must_use]
    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.session.autosave_delay_ms)
    }

    /// Max state age, or `None` when unlimited.
    #[must_use]
    pub fn max_age(&self) -> Option<chrono::Duration> {
        age_limit(self.storage.max_age_days)
    }

    /// Max state age with an optional override in days. An override of 0
    /// means unlimited.
    #[must_use]
    pub fn max_age_or(&self, days: Option<u32>) -> Option<chrono::Duration> {
        days.map_or_else(|| self.max_age(), age_limit)
    }

    /// Render as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn age_limit(days: u32) -> Option<chrono::Duration> {
    (days > 0).then(|| chrono::Duration::days(i64::from(days)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.session.autosave);
        assert!(config.session.restore_last_state);
        assert!(config.display.show_equations);
        assert_eq!(config.display.format, OutputFormat::Plain);
    }

    #[test]
    fn test_default_storage_config() {
        let storage = StorageConfig::default();

        assert!(storage.database_path.is_none());
        assert_eq!(storage.max_states, 10_000);
        assert_eq!(storage.max_age_days, 90);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_delay() {
        let mut config = Config::default();
        config.session.autosave_delay_ms = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("autosave_delay_ms"));
    }

    #[test]
    fn test_validate_table_limit() {
        let mut config = Config::default();
        config.display.max_table_inputs = 0;
        assert!(config.validate().is_err());

        config.display.max_table_inputs = MAX_TABLE_INPUTS_LIMIT + 1;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("max_table_inputs"));

        config.display.max_table_inputs = MAX_TABLE_INPUTS_LIMIT;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_database_path_default() {
        let path = Config::default().database_path();
        assert!(path.to_string_lossy().contains("states.db"));
        assert!(path.to_string_lossy().contains("gatelab"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_max_age() {
        let mut config = Config::default();
        assert_eq!(config.max_age(), Some(chrono::Duration::days(90)));
        config.storage.max_age_days = 0;
        assert!(config.max_age().is_none());
    }

    #[test]
    fn test_max_age_or_override() {
        let config = Config::default();
        assert_eq!(config.max_age_or(None), Some(chrono::Duration::days(90)));
        assert_eq!(config.max_age_or(Some(7)), Some(chrono::Duration::days(7)));
        assert!(config.max_age_or(Some(0)).is_none());
    }

    #[test]
    fn test_autosave_delay() {
        assert_eq!(Config::default().autosave_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("gatelab"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        figment::Jail::expect_with(|_| {
            let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_load_from_default_location() {
        figment::Jail::expect_with(|jail| {
            let dir = jail.directory().display().to_string();
            jail.set_env("XDG_CONFIG_HOME", dir);
            std::fs::create_dir_all(jail.directory().join("gatelab")).unwrap();
            jail.create_file("gatelab/config.toml", "[storage]\nmax_age_days = 3\n")?;
            let config = Config::load_from(None).unwrap();
            assert_eq!(config.max_age(), Some(chrono::Duration::days(3)));
            Ok(())
        });
    }

    #[test]
    fn test_load_from_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "gatelab.toml",
                "[session]\nautosave = false\nautosave_delay_ms = 250\n\n[display]\nformat = \"json\"\n",
            )?;
            let config = Config::load_from(Some(jail.directory().join("gatelab.toml"))).unwrap();
            assert!(!config.session.autosave);
            assert_eq!(config.session.autosave_delay_ms, 250);
            assert_eq!(config.display.format, OutputFormat::Json);
            assert_eq!(config.storage, StorageConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("gatelab.toml", "[display]\nmax_table_inputs = 40\n")?;
            let err = Config::load_from(Some(jail.directory().join("gatelab.toml"))).unwrap_err();
            assert!(matches!(err, Error::ConfigValidation { .. }));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[storage]\nmax_states = 5\n")?;
            jail.set_env("GATELAB_STORAGE__MAX_STATES", "7");
            let config: Config = Config::figment(PathBuf::from("config.toml")).extract()?;
            assert_eq!(config.storage.max_states, 7);
            Ok(())
        });
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"max_states": 5000, "max_age_days": 7}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(storage.max_states, 5000);
        assert_eq!(storage.max_age_days, 7);
        assert!(storage.database_path.is_none());
    }
}
