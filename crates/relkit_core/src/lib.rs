//! Release automation core: version file bumping and release-note
//! contributor filtering.

pub mod config;
pub mod logging;
pub mod notes;
pub mod plugin;
pub mod project;
pub mod version;

pub use config::{ConfigError, RelkitConfig};
pub use logging::{
    default_log_level, init_console_logging, init_logging, logging_status, LogTarget,
};
pub use notes::{release_contributors, Contributor, IgnoredContributor, Predicate};
pub use plugin::{
    BumpVersionFileTask, Plugin, PluginError, VersioningPlugin, VersioningSettings,
    BUMP_VERSION_FILE_TASK, RELEASE_NOTABLE_PROPERTY,
};
pub use project::{Project, ProjectError, Task, TaskError, TaskRegistry, Workspace};
pub use version::{
    BumpOptions, Version, VersionBump, VersionError, VersionFile, DEFAULT_VERSION_FILE_NAME,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
