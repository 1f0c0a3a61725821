//! Plugins that configure a [`Project`](crate::project::Project).
//!
//! # Responsibility
//! - Define the plugin contract.
//! - Ship the versioning plugin and its `bumpVersionFile` task.
//!
//! # Invariants
//! - A plugin either configures the project completely or returns an error;
//!   callers treat the error as fatal for the build step.

use crate::project::{Project, ProjectError};
use crate::version::VersionError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod versioning;

pub use versioning::{
    BumpVersionFileTask, VersioningPlugin, VersioningSettings, BUMP_VERSION_FILE_TASK,
    RELEASE_NOTABLE_PROPERTY, VERSIONING_PLUGIN_ID,
};

pub type PluginResult<T> = Result<T, PluginError>;

/// Configures a project: adds extensions, properties and tasks.
pub trait Plugin {
    /// Stable identifier; applying the same id twice is a no-op.
    fn id(&self) -> &'static str;
    fn apply(&self, project: &mut dyn Project) -> PluginResult<()>;
}

#[derive(Debug)]
pub enum PluginError {
    Version(VersionError),
    Project(ProjectError),
}

impl Display for PluginError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Version(err) => write!(f, "{err}"),
            Self::Project(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PluginError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Version(err) => Some(err),
            Self::Project(err) => Some(err),
        }
    }
}

impl From<VersionError> for PluginError {
    fn from(value: VersionError) -> Self {
        Self::Version(value)
    }
}

impl From<ProjectError> for PluginError {
    fn from(value: ProjectError) -> Self {
        Self::Project(value)
    }
}
