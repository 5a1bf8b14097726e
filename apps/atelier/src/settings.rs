//! # Application Settings
//!
//! Where the app keeps its storage, where exports go, how share links are
//! built and how long timers run. Not to be confused with the style
//! [`Configuration`](atelier_core::Configuration) the user edits.
//!
//! ## Sources (Priority Order)
//! 1. Environment variables (`ATELIER_*`)
//! 2. Settings file (`atelier.toml` in the platform config directory)
//! 3. Defaults (this file)
//!
//! ```toml
//! # ~/.config/atelier/atelier.toml
//! base_url = "https://shop.example.com/configurator"
//! export_dir = "/home/me/Downloads"
//! url_debounce_ms = 300
//! toast_ms = 2200
//! tax_rate_bps = 800
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use atelier_core::{TaxRate, DEFAULT_TAX_RATE_BPS, URL_DEBOUNCE_MS};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name of the settings file inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "atelier.toml";

/// Default toast lifetime.
pub const DEFAULT_TOAST_MS: u64 = 2200;

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Database file. `None` means the platform data directory.
    pub db_path: Option<PathBuf>,

    /// Page URL share links are built on (the fragment is appended).
    pub base_url: String,

    /// Directory `export` writes `ui-config.json` into.
    pub export_dir: PathBuf,

    /// Quiet period before the URL fragment is rewritten.
    pub url_debounce_ms: u64,

    /// Default toast lifetime.
    pub toast_ms: u64,

    /// Cart tax rate in basis points (800 = 8%).
    pub tax_rate_bps: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            db_path: None,
            base_url: "http://localhost:5173/".to_string(),
            export_dir: PathBuf::from("."),
            url_debounce_ms: URL_DEBOUNCE_MS,
            toast_ms: DEFAULT_TOAST_MS,
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
        }
    }
}

impl AppSettings {
    /// Loads settings from the platform settings file and the process
    /// environment.
    pub fn load() -> Result<Self, SettingsError> {
        let file = project_dirs().map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME));
        Self::load_from(file.as_deref(), |key| std::env::var(key).ok())
    }

    /// Loads settings from an explicit file and environment lookup.
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load_from<F>(file: Option<&Path>, env: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match file {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "Reading settings file");
                let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                toml::from_str(&text).map_err(|source| SettingsError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            _ => AppSettings::default(),
        };

        if let Some(path) = env("ATELIER_DB_PATH") {
            settings.db_path = Some(PathBuf::from(path));
        }
        if let Some(url) = env("ATELIER_BASE_URL") {
            settings.base_url = url;
        }
        if let Some(dir) = env("ATELIER_EXPORT_DIR") {
            settings.export_dir = PathBuf::from(dir);
        }
        if let Some(ms) = env("ATELIER_URL_DEBOUNCE_MS") {
            settings.url_debounce_ms = parse_env("ATELIER_URL_DEBOUNCE_MS", &ms)?;
        }
        if let Some(ms) = env("ATELIER_TOAST_MS") {
            settings.toast_ms = parse_env("ATELIER_TOAST_MS", &ms)?;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings, falling back to defaults when anything is wrong.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "Could not load settings, using defaults");
                AppSettings::default()
            }
        }
    }

    /// Checks the loaded values.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.url_debounce_ms == 0 {
            return Err(SettingsError::InvalidValue {
                key: "url_debounce_ms".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(SettingsError::InvalidValue {
                key: "base_url".to_string(),
                reason: format!("'{}' is not an http(s) URL", self.base_url),
            });
        }
        Ok(())
    }

    /// Resolves the database file, creating its directory.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.atelier.atelier/atelier.db`
    /// - **Windows**: `%APPDATA%\atelier\atelier\data\atelier.db`
    /// - **Linux**: `~/.local/share/atelier/atelier.db`
    pub fn database_path(&self) -> Result<PathBuf, SettingsError> {
        if let Some(path) = &self.db_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or(SettingsError::NoDataDir)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir).map_err(|source| SettingsError::Io {
            path: data_dir.to_path_buf(),
            source,
        })?;

        Ok(data_dir.join("atelier.db"))
    }

    pub fn url_debounce(&self) -> Duration {
        Duration::from_millis(self.url_debounce_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "atelier", "atelier")
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, SettingsError> {
    value.trim().parse().map_err(|_| SettingsError::InvalidValue {
        key: key.to_string(),
        reason: format!("'{}' is not a number", value),
    })
}

/// Settings errors.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Could not determine the app data directory")]
    NoDataDir,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = AppSettings::load_from(None, env_of(&[])).unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.url_debounce(), Duration::from_millis(300));
        assert_eq!(settings.toast_duration(), Duration::from_millis(2200));
        assert_eq!(settings.tax_rate().bps(), 800);
    }

    #[test]
    fn test_file_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(
            &path,
            "base_url = \"https://shop.example.com/\"\ntoast_ms = 1000\ntax_rate_bps = 725\n",
        )
        .unwrap();

        let settings = AppSettings::load_from(
            Some(&path),
            env_of(&[("ATELIER_TOAST_MS", "1500"), ("ATELIER_EXPORT_DIR", "/tmp/out")]),
        )
        .unwrap();

        assert_eq!(settings.base_url, "https://shop.example.com/");
        assert_eq!(settings.toast_ms, 1500);
        assert_eq!(settings.tax_rate_bps, 725);
        assert_eq!(settings.export_dir, PathBuf::from("/tmp/out"));
        assert_eq!(settings.url_debounce_ms, 300);
    }

    #[test]
    fn test_missing_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let settings = AppSettings::load_from(Some(&path), env_of(&[])).unwrap();
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "toast_ms = \"soon\"").unwrap();

        let err = AppSettings::load_from(Some(&path), env_of(&[])).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err =
            AppSettings::load_from(None, env_of(&[("ATELIER_URL_DEBOUNCE_MS", "0")])).unwrap_err();
        assert!(
            matches!(err, SettingsError::InvalidValue { ref key, .. } if key == "url_debounce_ms")
        );

        let err =
            AppSettings::load_from(None, env_of(&[("ATELIER_BASE_URL", "ftp://x")])).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { ref key, .. } if key == "base_url"));

        let err =
            AppSettings::load_from(None, env_of(&[("ATELIER_TOAST_MS", "abc")])).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
    }

    #[test]
    fn test_explicit_database_path() {
        let settings =
            AppSettings::load_from(None, env_of(&[("ATELIER_DB_PATH", "/tmp/a.db")])).unwrap();
        assert_eq!(settings.database_path().unwrap(), PathBuf::from("/tmp/a.db"));
    }
}
