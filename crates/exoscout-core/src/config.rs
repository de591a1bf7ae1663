use exoscout_api::archive::{ARCHIVE_TAP_SYNC, DEFAULT_COLUMNS, DEFAULT_TABLE, DEFAULT_USER_AGENT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
///
/// Loaded from `<config dir>/exoscout/config.toml` when present, defaults
/// otherwise. CLI flags override individual fields after loading.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load config from default location, or defaults if there is no file
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from an explicit path; the file must exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save config to the default location
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// XDG config dir on Linux, Application Support on macOS, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("exoscout");

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchiveConfig {
    /// TAP sync endpoint
    #[serde(default = "default_archive_url")]
    pub url: String,

    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default = "default_columns")]
    pub columns: Vec<String>,

    /// Request timeout; unset means wait as long as the server does
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Extra attempts after a transient failure
    #[serde(default)]
    pub max_retries: u32,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_archive_url() -> String {
    ARCHIVE_TAP_SYNC.to_string()
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_columns() -> Vec<String> {
    DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            url: default_archive_url(),
            table: default_table(),
            columns: default_columns(),
            timeout_secs: None,
            max_retries: 0,
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// How many search matches get printed
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
}

fn default_result_limit() -> usize {
    10
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            result_limit: default_result_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.archive.url,
            "https://exoplanetarchive.ipac.caltech.edu/TAP/sync"
        );
        assert_eq!(config.archive.table, "ps");
        assert_eq!(
            config.archive.columns,
            vec!["pl_name", "pl_orbper", "pl_rade", "disc_year"]
        );
        assert_eq!(config.archive.timeout_secs, None);
        assert_eq!(config.archive.max_retries, 0);
        assert_eq!(config.display.result_limit, 10);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("[archive]"));
        assert!(toml.contains("result_limit"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [archive]
            timeout_secs = 30
            max_retries = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.archive.timeout_secs, Some(30));
        assert_eq!(config.archive.max_retries, 2);
        assert_eq!(config.archive.table, "ps");
        assert_eq!(config.display.result_limit, 10);
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.display.result_limit = 25;
        config.archive.timeout_secs = Some(60);
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    // `dirs` follows XDG_CONFIG_HOME on Linux; no other test in this crate
    // reads the default config location.
    #[cfg(target_os = "linux")]
    #[test]
    fn test_save_and_load_default_location() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("XDG_CONFIG_HOME", dir.path());

        let path = Config::config_path().unwrap();
        assert_eq!(path, dir.path().join("exoscout").join("config.toml"));
        assert_eq!(Config::load().unwrap(), Config::default());

        let mut config = Config::default();
        config.archive.max_retries = 3;
        config.save().unwrap();

        assert!(path.exists());
        assert_eq!(Config::load().unwrap(), config);
    }

    #[test]
    fn test_load_from_garbage_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "archive = [not toml").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(crate::Error::ConfigError(_))
        ));
    }
}
