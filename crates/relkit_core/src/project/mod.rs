//! Build-project abstraction that plugins configure.
//!
//! # Responsibility
//! - Describe what a plugin may touch: version, extensions, extra
//!   properties and the task registry.
//! - Provide `Workspace`, the filesystem-rooted implementation used by the CLI.
//!
//! # Invariants
//! - Task names are unique inside one registry.
//! - One extension per concrete type.
//! - `set_version_all` updates the root project and every member.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

mod extensions;
mod task;
mod workspace;

pub use extensions::{Extensions, ExtraProperties, PropertyValue};
pub use task::{Task, TaskError, TaskRegistry, TaskResult};
pub use workspace::{MemberProject, Workspace};

/// Project surface exposed to plugins.
pub trait Project {
    fn name(&self) -> &str;
    fn root_dir(&self) -> &Path;
    fn version(&self) -> Option<&str>;
    /// Sets `version` on the root project and all member projects.
    fn set_version_all(&mut self, version: &str);
    fn extensions(&self) -> &Extensions;
    fn extensions_mut(&mut self) -> &mut Extensions;
    fn extra_properties(&self) -> &ExtraProperties;
    fn extra_properties_mut(&mut self) -> &mut ExtraProperties;
    fn tasks(&self) -> &TaskRegistry;
    fn tasks_mut(&mut self) -> &mut TaskRegistry;
}

/// Project wiring and task execution errors.
#[derive(Debug)]
pub enum ProjectError {
    DuplicateTask(String),
    UnknownTask(String),
    DuplicateExtension(&'static str),
    TaskFailed { task: String, source: TaskError },
}

impl Display for ProjectError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateTask(name) => write!(f, "task already registered: {name}"),
            Self::UnknownTask(name) => write!(f, "task not found: {name}"),
            Self::DuplicateExtension(type_name) => {
                write!(f, "extension already registered: {type_name}")
            }
            Self::TaskFailed { task, source } => write!(f, "task `{task}` failed: {source}"),
        }
    }
}

impl Error for ProjectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TaskFailed { source, .. } => Some(source),
            Self::DuplicateTask(_) | Self::UnknownTask(_) | Self::DuplicateExtension(_) => None,
        }
    }
}
