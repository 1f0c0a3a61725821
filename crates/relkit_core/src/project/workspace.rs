//! Filesystem-rooted project with member projects.

use super::{Extensions, ExtraProperties, Project, TaskRegistry};
use crate::plugin::{Plugin, PluginResult};
use log::{debug, info};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const FALLBACK_PROJECT_NAME: &str = "root";

/// Member project sharing the workspace version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberProject {
    name: String,
    version: Option<String>,
}

impl MemberProject {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

/// Root project plus members, rooted at one directory.
pub struct Workspace {
    name: String,
    root_dir: PathBuf,
    version: Option<String>,
    members: Vec<MemberProject>,
    extensions: Extensions,
    extra_properties: ExtraProperties,
    tasks: TaskRegistry,
    applied_plugins: BTreeSet<&'static str>,
}

impl Workspace {
    /// Creates a workspace without members. The name is the root directory's
    /// file name; paths like `.` or `..` are resolved on disk first.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        let root_dir = root_dir.into();
        let name = directory_name(&root_dir)
            .or_else(|| {
                root_dir
                    .canonicalize()
                    .ok()
                    .and_then(|resolved| directory_name(&resolved))
            })
            .unwrap_or_else(|| FALLBACK_PROJECT_NAME.to_string());
        Self {
            name,
            root_dir,
            version: None,
            members: Vec::new(),
            extensions: Extensions::default(),
            extra_properties: ExtraProperties::default(),
            tasks: TaskRegistry::new(),
            applied_plugins: BTreeSet::new(),
        }
    }

    /// Adds member projects; names already present are skipped.
    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in members {
            let name = name.into();
            if self.member(&name).is_none() {
                self.members.push(MemberProject {
                    name,
                    version: self.version.clone(),
                });
            }
        }
        self
    }

    pub fn members(&self) -> &[MemberProject] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&MemberProject> {
        self.members.iter().find(|member| member.name == name)
    }

    /// Applies `plugin` once; later applications of the same plugin id are
    /// no-ops.
    pub fn apply_plugin(&mut self, plugin: &dyn Plugin) -> PluginResult<()> {
        let id = plugin.id();
        if self.applied_plugins.contains(id) {
            debug!("event=plugin_apply module=project status=skipped plugin={id}");
            return Ok(());
        }
        plugin.apply(self)?;
        self.applied_plugins.insert(id);
        info!(
            "event=plugin_apply module=project status=ok plugin={} project={}",
            id, self.name
        );
        Ok(())
    }

    pub fn has_plugin(&self, id: &str) -> bool {
        self.applied_plugins.contains(id)
    }
}

fn directory_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

impl Project for Workspace {
    fn name(&self) -> &str {
        &self.name
    }

    fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn set_version_all(&mut self, version: &str) {
        self.version = Some(version.to_string());
        for member in &mut self.members {
            member.version = Some(version.to_string());
        }
    }

    fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }

    fn extra_properties(&self) -> &ExtraProperties {
        &self.extra_properties
    }

    fn extra_properties_mut(&mut self) -> &mut ExtraProperties {
        &mut self.extra_properties
    }

    fn tasks(&self) -> &TaskRegistry {
        &self.tasks
    }

    fn tasks_mut(&mut self) -> &mut TaskRegistry {
        &mut self.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::Workspace;
    use crate::project::Project;

    #[test]
    fn name_comes_from_root_dir() {
        let workspace = Workspace::new("/tmp/relkit-demo");
        assert_eq!(workspace.name(), "relkit-demo");
        assert_eq!(Workspace::new("/").name(), "root");
    }

    #[test]
    fn relative_dot_root_is_named_after_current_dir() {
        let current = std::env::current_dir().unwrap();
        let expected = current.file_name().unwrap().to_string_lossy().into_owned();

        assert_eq!(Workspace::new(".").name(), expected);
        assert_eq!(Workspace::new(".").root_dir(), std::path::Path::new("."));
    }

    #[test]
    fn set_version_all_reaches_every_member() {
        let mut workspace = Workspace::new("/tmp/app").with_members(["core", "cli", "core"]);
        assert_eq!(workspace.members().len(), 2);

        workspace.set_version_all("1.4.0");
        assert_eq!(workspace.version(), Some("1.4.0"));
        assert!(workspace
            .members()
            .iter()
            .all(|member| member.version() == Some("1.4.0")));
    }
}
