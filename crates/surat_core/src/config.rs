//! Application configuration.
//!
//! # Responsibility
//! - Load `AppConfig` from an optional TOML file.
//! - Apply `SURAT_*` environment overrides on top of the file.
//! - Reject inconsistent settings before anything is opened.
//!
//! # Invariants
//! - A missing file yields defaults; a malformed one is an error.
//! - Environment values win over file values.

use crate::logging::{default_log_level, parse_level};
use crate::pagination::{PaginationPolicy, TABLE_CAPACITY};
use crate::render::{OfficeProfile, RenderContext};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_STORAGE: &str = "SURAT_STORAGE";
pub const ENV_DB_PATH: &str = "SURAT_DB_PATH";
pub const ENV_API_BASE_URL: &str = "SURAT_API_BASE_URL";
pub const ENV_CREATED_BY: &str = "SURAT_CREATED_BY";
pub const ENV_LOG_LEVEL: &str = "SURAT_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "SURAT_LOG_DIR";

const DEFAULT_DB_FILE: &str = "surat.db";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config file: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Which archive backend the app talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// SQLite file on this machine.
    Local { db_path: PathBuf },
    /// Office letter API; `created_by` is the backend user id.
    Remote {
        base_url: String,
        #[serde(default)]
        created_by: i64,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::Local {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Absolute directory; logging stays off when unset.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub pagination: PaginationPolicy,
    pub logging: LoggingConfig,
    pub office: OfficeProfile,
}

impl AppConfig {
    /// Parses a TOML document; absent sections keep their defaults.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads `path` (if any) and applies process environment overrides.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_with_env(path, |name| std::env::var(name).ok())
    }

    /// Same as [`AppConfig::load`] with an explicit variable lookup.
    pub fn load_with_env(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&text)?
            }
            _ => Self::default(),
        };

        config.apply_env(lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<()> {
        let var = |name: &str| lookup(name).map(|value| value.trim().to_string());

        if let Some(backend) = var(ENV_STORAGE) {
            self.storage = match (backend.as_str(), &self.storage) {
                ("local", StorageConfig::Local { .. }) | ("remote", StorageConfig::Remote { .. }) => {
                    self.storage.clone()
                }
                ("local", StorageConfig::Remote { .. }) => StorageConfig::default(),
                ("remote", StorageConfig::Local { .. }) => StorageConfig::Remote {
                    base_url: String::new(),
                    created_by: 0,
                },
                (other, _) => {
                    return Err(ConfigError::Invalid(format!(
                        "{ENV_STORAGE} must be `local` or `remote`, got `{other}`"
                    )))
                }
            };
        }

        match &mut self.storage {
            StorageConfig::Local { db_path } => {
                if let Some(path) = var(ENV_DB_PATH) {
                    *db_path = PathBuf::from(path);
                }
            }
            StorageConfig::Remote {
                base_url,
                created_by,
            } => {
                if let Some(url) = var(ENV_API_BASE_URL) {
                    *base_url = url;
                }
                if let Some(raw) = var(ENV_CREATED_BY) {
                    *created_by = raw.parse().map_err(|_| {
                        ConfigError::Invalid(format!("{ENV_CREATED_BY} must be an integer"))
                    })?;
                }
            }
        }

        if let Some(level) = var(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(dir) = var(ENV_LOG_DIR) {
            self.logging.dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    /// Checks cross-field rules.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(window) = self.pagination.force_split {
            if window.min_people == 0
                || window.min_people > window.max_people
                || window.max_people > TABLE_CAPACITY
            {
                return Err(ConfigError::Invalid(format!(
                    "pagination.force_split needs 1 <= min_people <= max_people <= {TABLE_CAPACITY}, got {}..={}",
                    window.min_people, window.max_people
                )));
            }
        }

        match &self.storage {
            StorageConfig::Local { db_path } if db_path.as_os_str().is_empty() => {
                return Err(ConfigError::Invalid("storage.db_path is empty".to_string()));
            }
            StorageConfig::Remote { base_url, .. } if base_url.trim().is_empty() => {
                return Err(ConfigError::Invalid(
                    "storage.base_url is required for the remote backend".to_string(),
                ));
            }
            _ => {}
        }

        parse_level(&self.logging.level).map_err(ConfigError::Invalid)?;
        if let Some(dir) = &self.logging.dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "logging.dir must be absolute, got `{}`",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Render inputs for a signature dated `signature_date`.
    pub fn render_context(&self, signature_date: NaiveDate) -> RenderContext {
        RenderContext::new(self.office.clone(), self.pagination, signature_date)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, StorageConfig, ENV_API_BASE_URL, ENV_STORAGE};
    use crate::pagination::ForceSplit;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config =
            AppConfig::load_with_env(Some(Path::new("/nonexistent/surat.toml")), env(&[])).unwrap();
        assert_eq!(config.storage, StorageConfig::default());
        assert_eq!(config.pagination.force_split, None);
        assert_eq!(config.office.city, "Mataram");
    }

    #[test]
    fn toml_sections_are_read() {
        let config = AppConfig::from_toml_str(
            r#"
            [storage]
            backend = "remote"
            base_url = "http://localhost:3000"
            created_by = 7

            [pagination.force_split]
            min_people = 3
            max_people = 4

            [office]
            city = "Selong"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.storage,
            StorageConfig::Remote {
                base_url: "http://localhost:3000".to_string(),
                created_by: 7
            }
        );
        assert_eq!(
            config.pagination.force_split,
            Some(ForceSplit {
                min_people: 3,
                max_people: 4
            })
        );
        assert_eq!(config.office.city, "Selong");
        assert_eq!(config.office.signer_title, "Kepala,");
    }

    #[test]
    fn env_switches_backend_and_overrides_url() {
        let config = AppConfig::load_with_env(
            None,
            env(&[(ENV_STORAGE, "remote"), (ENV_API_BASE_URL, "http://api.test")]),
        )
        .unwrap();
        assert_eq!(
            config.storage,
            StorageConfig::Remote {
                base_url: "http://api.test".to_string(),
                created_by: 0
            }
        );

        let config =
            AppConfig::load_with_env(None, env(&[("SURAT_DB_PATH", "/tmp/arsip.db")])).unwrap();
        assert_eq!(
            config.storage,
            StorageConfig::Local {
                db_path: PathBuf::from("/tmp/arsip.db")
            }
        );
    }

    #[test]
    fn inconsistent_values_are_rejected() {
        let err = AppConfig::load_with_env(None, env(&[(ENV_STORAGE, "remote")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = AppConfig::load_with_env(None, env(&[(ENV_STORAGE, "cloud")])).unwrap_err();
        assert!(err.to_string().contains("SURAT_STORAGE"));

        let mut config = AppConfig::default();
        config.pagination.force_split = Some(ForceSplit {
            min_people: 4,
            max_people: 3,
        });
        assert!(config.validate().is_err());

        config.pagination.force_split = Some(ForceSplit {
            min_people: 12,
            max_people: 15,
        });
        assert!(config.validate().is_err());

        config.pagination.force_split = None;
        config.logging.dir = Some(PathBuf::from("logs"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AppConfig::from_toml_str("storage = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
