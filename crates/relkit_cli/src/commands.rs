//! Command handlers. Each returns the text printed to stdout.

use crate::cli::Commands;
use anyhow::{anyhow, Context};
use log::info;
use relkit_core::{
    release_contributors, Contributor, IgnoredContributor, Project, RelkitConfig, VersionFile,
    VersioningPlugin, Workspace, BUMP_VERSION_FILE_TASK, RELEASE_NOTABLE_PROPERTY,
};
use std::path::Path;

pub fn dispatch(
    command: &Commands,
    root: &Path,
    config: &RelkitConfig,
) -> anyhow::Result<String> {
    match command {
        Commands::Version => show_version(root, config),
        Commands::Bump { notable } => bump(root, config, *notable),
        Commands::Tasks => list_tasks(root, config),
        Commands::Run { task } => run_task(root, config, task),
        Commands::Contributors { file, ignore } => contributors(config, file, ignore),
    }
}

/// Builds the workspace for `root` and applies the versioning plugin.
fn load_workspace(
    root: &Path,
    config: &RelkitConfig,
    record_notable: bool,
) -> anyhow::Result<Workspace> {
    let mut settings = config.versioning_settings();
    settings.record_notable |= record_notable;

    let mut workspace =
        Workspace::new(root).with_members(config.workspace.members.iter().cloned());
    workspace
        .apply_plugin(&VersioningPlugin::new(settings))
        .with_context(|| format!("failed to configure workspace `{}`", root.display()))?;

    if let Some(version_file) = workspace.extensions().get::<VersionFile>() {
        info!(
            "event=workspace_ready module=cli status=ok project={} version={} file={}",
            workspace.name(),
            version_file.version(),
            version_file.file_name()
        );
    }
    Ok(workspace)
}

fn show_version(root: &Path, config: &RelkitConfig) -> anyhow::Result<String> {
    let workspace = load_workspace(root, config, false)?;
    let version_file = workspace
        .extensions()
        .get::<VersionFile>()
        .ok_or_else(|| anyhow!("versioning plugin did not register a version file"))?;
    let notable = workspace
        .extra_properties()
        .get_bool(RELEASE_NOTABLE_PROPERTY)
        .unwrap_or(false);

    let mut lines = vec![
        format!("version: {}", version_file.version()),
        format!("file: {}", version_file.file_name()),
        format!("notable: {notable}"),
    ];
    if let Some(previous) = version_file.previous_version() {
        lines.push(format!("previous: {previous}"));
    }
    if !version_file.notable_versions().is_empty() {
        lines.push(format!(
            "notable versions: {}",
            version_file.notable_versions().join(", ")
        ));
    }
    for member in workspace.members() {
        lines.push(format!(
            "member {}: {}",
            member.name(),
            member.version().unwrap_or("-")
        ));
    }
    Ok(lines.join("\n"))
}

fn bump(root: &Path, config: &RelkitConfig, notable: bool) -> anyhow::Result<String> {
    let workspace = load_workspace(root, config, notable)?;
    Ok(workspace.tasks().run(BUMP_VERSION_FILE_TASK)?)
}

fn list_tasks(root: &Path, config: &RelkitConfig) -> anyhow::Result<String> {
    let workspace = load_workspace(root, config, false)?;
    let width = workspace.tasks().names().map(str::len).max().unwrap_or(0);
    Ok(workspace
        .tasks()
        .iter()
        .map(|task| format!("{:<width$}  {}", task.name(), task.description()))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn run_task(root: &Path, config: &RelkitConfig, task: &str) -> anyhow::Result<String> {
    let workspace = load_workspace(root, config, false)?;
    Ok(workspace.tasks().run(task)?)
}

fn contributors(
    config: &RelkitConfig,
    file: &Path,
    extra_ignored: &[String],
) -> anyhow::Result<String> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read contributors file `{}`", file.display()))?;
    let contributors: Vec<Contributor> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse contributors file `{}`", file.display()))?;

    let ignored = IgnoredContributor::of(
        config
            .notes
            .ignored_contributors
            .iter()
            .chain(extra_ignored)
            .cloned(),
    );
    let total = contributors.len();
    let credited = release_contributors(contributors, &ignored);
    info!(
        "event=contributors_filtered module=cli status=ok total={} credited={} ignored_entries={}",
        total,
        credited.len(),
        ignored.entries().len()
    );

    Ok(serde_json::to_string_pretty(&credited)?)
}

#[cfg(test)]
mod tests {
    use super::dispatch;
    use crate::cli::Commands;
    use relkit_core::{RelkitConfig, VersionFile};
    use std::fs;

    #[test]
    fn version_reports_loaded_version_and_members() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("version.properties"),
            "version=1.2.0\nnotableRelease=true\n",
        )
        .unwrap();
        let mut config = RelkitConfig::default();
        config.workspace.members = vec!["core".to_string()];

        let output = dispatch(&Commands::Version, dir.path(), &config).unwrap();
        assert!(output.contains("version: 1.2.0"));
        assert!(output.contains("notable: true"));
        assert!(output.contains("member core: 1.2.0"));
    }

    #[test]
    fn bump_and_tasks_go_through_registered_task() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("version.properties");
        fs::write(&path, "version=0.3.9\n").unwrap();
        let config = RelkitConfig::default();

        let tasks = dispatch(&Commands::Tasks, dir.path(), &config).unwrap();
        assert_eq!(
            tasks,
            "bumpVersionFile  Increments version number in version.properties"
        );

        let summary = dispatch(&Commands::Bump { notable: true }, dir.path(), &config).unwrap();
        assert_eq!(
            summary,
            "Bumped version in 'version.properties': 0.3.9 -> 0.3.10"
        );
        let reloaded = VersionFile::load(&path).unwrap();
        assert_eq!(reloaded.notable_versions(), ["0.3.9"]);
    }

    #[test]
    fn run_unknown_task_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("version.properties"), "version=1.0.0\n").unwrap();

        let err = dispatch(
            &Commands::Run {
                task: "publish".to_string(),
            },
            dir.path(),
            &RelkitConfig::default(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("task not found: publish"));
    }

    #[test]
    fn missing_version_file_is_reported_with_context() {
        let dir = tempfile::tempdir().unwrap();
        let err = dispatch(&Commands::Version, dir.path(), &RelkitConfig::default()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("failed to configure workspace"));
        assert!(message.contains("version.properties"));
    }

    #[test]
    fn contributors_merges_config_and_flag_ignores() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("people.json");
        fs::write(
            &file,
            r#"[{"login":"release-bot"},{"login":"szczepiq","name":"Szczepan Faber"},{"name":"Drone"}]"#,
        )
        .unwrap();
        let mut config = RelkitConfig::default();
        config.notes.ignored_contributors = vec!["release-bot".to_string()];

        let output = dispatch(
            &Commands::Contributors {
                file,
                ignore: vec!["Drone".to_string()],
            },
            dir.path(),
            &config,
        )
        .unwrap();

        let credited: Vec<relkit_core::Contributor> = serde_json::from_str(&output).unwrap();
        assert_eq!(credited.len(), 1);
        assert_eq!(credited[0].login.as_deref(), Some("szczepiq"));
    }
}
