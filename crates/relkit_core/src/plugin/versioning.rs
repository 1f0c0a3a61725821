//! Versioning plugin.
//!
//! Loads `version.properties` from the project root, publishes the version to
//! every project and registers the `bumpVersionFile` task.

use super::{Plugin, PluginResult};
use crate::project::{Project, ProjectError, Task, TaskResult};
use crate::version::{BumpOptions, VersionFile, DEFAULT_VERSION_FILE_NAME};
use log::info;
use std::any::type_name;
use std::path::PathBuf;

pub const VERSIONING_PLUGIN_ID: &str = "relkit.versioning";
pub const BUMP_VERSION_FILE_TASK: &str = "bumpVersionFile";
/// Extra property mirroring the version file's notability flag.
pub const RELEASE_NOTABLE_PROPERTY: &str = "release_notable";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersioningSettings {
    /// Version file name, resolved against the project root.
    pub file_name: String,
    /// Whether `bumpVersionFile` records the outgoing version as notable.
    pub record_notable: bool,
}

impl Default for VersioningSettings {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_VERSION_FILE_NAME.to_string(),
            record_notable: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VersioningPlugin {
    settings: VersioningSettings,
}

impl VersioningPlugin {
    pub fn new(settings: VersioningSettings) -> Self {
        Self { settings }
    }
}

/// Fails before anything is written when the project already carries the
/// wiring this plugin would add.
fn ensure_unwired(project: &dyn Project) -> Result<(), ProjectError> {
    if project.extensions().contains::<VersionFile>() {
        return Err(ProjectError::DuplicateExtension(type_name::<VersionFile>()));
    }
    if project.tasks().contains(BUMP_VERSION_FILE_TASK) {
        return Err(ProjectError::DuplicateTask(
            BUMP_VERSION_FILE_TASK.to_string(),
        ));
    }
    Ok(())
}

impl Plugin for VersioningPlugin {
    fn id(&self) -> &'static str {
        VERSIONING_PLUGIN_ID
    }

    fn apply(&self, project: &mut dyn Project) -> PluginResult<()> {
        ensure_unwired(project)?;
        let path = project.root_dir().join(&self.settings.file_name);
        let version_file = VersionFile::load(&path)?;

        let version = version_file.version().to_string();
        let file_name = version_file.file_name();
        let notable = version_file.is_notable_release();

        project.extensions_mut().add(version_file)?;
        project
            .extra_properties_mut()
            .set(RELEASE_NOTABLE_PROPERTY, notable);

        info!(
            "event=version_resolved module=plugin status=ok project={} version={} file={} notable={}",
            project.name(),
            version,
            file_name,
            notable
        );

        project.set_version_all(&version);

        let task = BumpVersionFileTask::new(
            path,
            &file_name,
            BumpOptions {
                record_notable: self.settings.record_notable,
            },
        );
        project.tasks_mut().register(Box::new(task))?;
        Ok(())
    }
}

/// Increments the version stored in the version file.
#[derive(Debug, Clone)]
pub struct BumpVersionFileTask {
    path: PathBuf,
    description: String,
    options: BumpOptions,
}

impl BumpVersionFileTask {
    pub fn new(path: impl Into<PathBuf>, file_name: &str, options: BumpOptions) -> Self {
        Self {
            path: path.into(),
            description: format!("Increments version number in {file_name}"),
            options,
        }
    }
}

impl Task for BumpVersionFileTask {
    fn name(&self) -> &str {
        BUMP_VERSION_FILE_TASK
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn run(&self) -> TaskResult<String> {
        let mut file = VersionFile::load(&self.path)?;
        let bump = file.bump(self.options)?;
        Ok(format!(
            "Bumped version in '{}': {} -> {}",
            file.file_name(),
            bump.previous,
            bump.current
        ))
    }
}
