//! Layered tool configuration.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`RELKIT_*`, `__` separates nested keys, e.g.
//!    `RELKIT_VERSION__FILE`)
//! 2. `<root>/relkit.toml`
//! 3. Built-in defaults
//!
//! ```toml
//! [version]
//! file = "version.properties"
//! record_notable = false
//!
//! [notes]
//! ignored_contributors = ["release-bot"]
//!
//! [workspace]
//! members = ["core", "cli"]
//!
//! [logging]
//! level = "info"
//! ```

use crate::logging::normalize_level;
use crate::notes::IgnoredContributor;
use crate::plugin::VersioningSettings;
use crate::version::DEFAULT_VERSION_FILE_NAME;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::ffi::OsStr;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "relkit.toml";
pub const ENV_PREFIX: &str = "RELKIT_";

fn default_version_file() -> String {
    DEFAULT_VERSION_FILE_NAME.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RelkitConfig {
    #[serde(default)]
    pub version: VersionConfig,
    #[serde(default)]
    pub notes: NotesConfig,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VersionConfig {
    /// Version file name relative to the workspace root.
    #[serde(default = "default_version_file")]
    pub file: String,
    #[serde(default)]
    pub record_notable: bool,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            file: default_version_file(),
            record_notable: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotesConfig {
    /// Logins or display names left out of release-note credits.
    #[serde(default)]
    pub ignored_contributors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WorkspaceConfig {
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: Option<String>,
    /// Absolute directory for rolling log files; stderr when unset.
    #[serde(default)]
    pub dir: Option<String>,
}

impl RelkitConfig {
    /// Provider chain for a workspace rooted at `root_dir`.
    pub fn figment(root_dir: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(root_dir.join(CONFIG_FILE_NAME)))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads and validates configuration for `root_dir`.
    ///
    /// A missing `relkit.toml` is not an error.
    pub fn load(root_dir: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(root_dir).extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let file = self.version.file.as_str();
        if file.trim().is_empty() || Path::new(file).file_name() != Some(OsStr::new(file)) {
            return Err(ConfigError::InvalidValue {
                field: "version.file",
                reason: format!("expected a bare file name, got `{file}`"),
            });
        }
        if let Some(level) = &self.logging.level {
            normalize_level(level).map_err(|reason| ConfigError::InvalidValue {
                field: "logging.level",
                reason,
            })?;
        }
        Ok(())
    }

    pub fn versioning_settings(&self) -> VersioningSettings {
        VersioningSettings {
            file_name: self.version.file.clone(),
            record_notable: self.version.record_notable,
        }
    }

    pub fn ignored_contributors(&self) -> IgnoredContributor {
        IgnoredContributor::of(self.notes.ignored_contributors.iter().cloned())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Figment(Box<figment::Error>),
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Figment(err) => write!(f, "configuration error: {err}"),
            Self::InvalidValue { field, reason } => {
                write!(f, "invalid configuration value for `{field}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Figment(err) => Some(err.as_ref()),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self::Figment(Box::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, RelkitConfig, CONFIG_FILE_NAME};
    use crate::notes::{Contributor, Predicate};
    use figment::Jail;

    #[test]
    fn defaults_apply_without_config_file() {
        Jail::expect_with(|jail| {
            let config = RelkitConfig::load(jail.directory()).expect("defaults load");
            assert_eq!(config, RelkitConfig::default());
            assert_eq!(config.version.file, "version.properties");
            assert!(config.ignored_contributors().is_empty());
            Ok(())
        });
    }

    #[test]
    fn toml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE_NAME,
                r#"
                [version]
                file = "release.properties"
                record_notable = true

                [notes]
                ignored_contributors = ["release-bot"]

                [workspace]
                members = ["core", "cli"]
                "#,
            )?;

            let config = RelkitConfig::load(jail.directory()).expect("toml config loads");
            let settings = config.versioning_settings();
            assert_eq!(settings.file_name, "release.properties");
            assert!(settings.record_notable);
            assert_eq!(config.workspace.members, vec!["core", "cli"]);
            assert!(config
                .ignored_contributors()
                .is_true(&Contributor::new(Some("release-bot"), None)));
            Ok(())
        });
    }

    #[test]
    fn env_beats_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE_NAME, "[version]\nfile = \"from-toml.properties\"\n")?;
            jail.set_env("RELKIT_VERSION__FILE", "from-env.properties");
            jail.set_env("RELKIT_LOGGING__LEVEL", "debug");

            let config = RelkitConfig::load(jail.directory()).expect("env config loads");
            assert_eq!(config.version.file, "from-env.properties");
            assert_eq!(config.logging.level.as_deref(), Some("debug"));
            Ok(())
        });
    }

    #[test]
    fn rejects_version_file_with_directories() {
        Jail::expect_with(|jail| {
            jail.set_env("RELKIT_VERSION__FILE", "nested/version.properties");
            let err = RelkitConfig::load(jail.directory()).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidValue {
                    field: "version.file",
                    ..
                }
            ));
            Ok(())
        });
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut config = RelkitConfig::default();
        config.logging.level = Some("loud".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }
}
