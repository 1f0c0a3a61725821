//! Named, runnable units of work.

use super::ProjectError;
use crate::version::VersionError;
use log::{error, info};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type TaskResult<T> = Result<T, TaskError>;

/// Failure raised by a task body.
#[derive(Debug)]
pub enum TaskError {
    Version(VersionError),
}

impl Display for TaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Version(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Version(err) => Some(err),
        }
    }
}

impl From<VersionError> for TaskError {
    fn from(value: VersionError) -> Self {
        Self::Version(value)
    }
}

/// Unit of work registered on a project.
pub trait Task {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    /// Runs the task and returns a one-line summary for the user.
    fn run(&self) -> TaskResult<String>;
}

/// Name-ordered task registry.
#[derive(Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<String, Box<dyn Task>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `task` under its own name.
    ///
    /// # Errors
    /// - `ProjectError::DuplicateTask` when the name is already taken.
    pub fn register(&mut self, task: Box<dyn Task>) -> Result<(), ProjectError> {
        let name = task.name().to_string();
        if self.tasks.contains_key(name.as_str()) {
            return Err(ProjectError::DuplicateTask(name));
        }
        self.tasks.insert(name, task);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Task> {
        self.tasks.get(name).map(|task| task.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Task> {
        self.tasks.values().map(|task| task.as_ref())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Runs the task called `name`.
    pub fn run(&self, name: &str) -> Result<String, ProjectError> {
        let task = self
            .get(name)
            .ok_or_else(|| ProjectError::UnknownTask(name.to_string()))?;

        let started_at = Instant::now();
        info!("event=task_run module=project status=start task={name}");
        match task.run() {
            Ok(summary) => {
                info!(
                    "event=task_run module=project status=ok task={} duration_ms={}",
                    name,
                    started_at.elapsed().as_millis()
                );
                Ok(summary)
            }
            Err(err) => {
                error!(
                    "event=task_run module=project status=error task={} duration_ms={} error={}",
                    name,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(ProjectError::TaskFailed {
                    task: name.to_string(),
                    source: err,
                })
            }
        }
    }
}
