//! `version.properties` persistence.
//!
//! # Responsibility
//! - Read the release version and notability metadata from a flat
//!   properties file.
//! - Rewrite single properties in place, keeping every other line intact.
//!
//! # Invariants
//! - New file content is computed fully in memory before anything is written.
//! - Writes go through a sibling temp file that is renamed over the target.

use super::number::Version;
use super::{VersionError, VersionResult};
use log::{error, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name used when no other name is configured.
pub const DEFAULT_VERSION_FILE_NAME: &str = "version.properties";

const VERSION_KEY: &str = "version";
const NOTABLE_RELEASE_KEY: &str = "notableRelease";
const NOTABLE_VERSIONS_KEY: &str = "notableVersions";
const PREVIOUS_VERSION_KEY: &str = "previousVersion";

/// Options for [`VersionFile::bump`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BumpOptions {
    /// Prepend the outgoing version to `notableVersions`.
    pub record_notable: bool,
}

/// Result of a successful bump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionBump {
    pub previous: Version,
    pub current: Version,
}

/// In-memory view of one version file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFile {
    path: PathBuf,
    version: Version,
    notable_release: bool,
    notable_versions: Vec<String>,
    previous_version: Option<String>,
}

impl VersionFile {
    /// Reads and parses the version file at `path`.
    ///
    /// # Errors
    /// - `VersionError::Io` when the file is missing or unreadable.
    /// - Any parse error from [`VersionFile::parse`].
    pub fn load(path: impl AsRef<Path>) -> VersionResult<Self> {
        let path = path.as_ref();
        let loaded = read_text(path).and_then(|text| Self::parse(path, &text));
        match &loaded {
            Ok(file) => info!(
                "event=version_file_load module=version status=ok file={} version={}",
                path.display(),
                file.version
            ),
            Err(err) => error!(
                "event=version_file_load module=version status=error file={} error={}",
                path.display(),
                err
            ),
        }
        loaded
    }

    /// Parses version file `text` without touching the filesystem.
    ///
    /// When a key appears more than once, the last occurrence wins.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> VersionResult<Self> {
        let path = path.into();
        let mut version = None;
        let mut notable_release = None;
        let mut notable_versions = None;
        let mut previous_version = None;

        for (key, value) in text.lines().filter_map(parse_property) {
            match key {
                VERSION_KEY => version = Some(value),
                NOTABLE_RELEASE_KEY => notable_release = Some(value),
                NOTABLE_VERSIONS_KEY => notable_versions = Some(value),
                PREVIOUS_VERSION_KEY => previous_version = Some(value),
                _ => {}
            }
        }

        let Some(version) = version else {
            return Err(VersionError::MissingVersion { path });
        };
        let version = Version::parse(version)?;
        let notable_release = match notable_release {
            Some(value) => parse_flag(NOTABLE_RELEASE_KEY, value)?,
            None => false,
        };
        let notable_versions = notable_versions
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let previous_version = previous_version
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Ok(Self {
            path,
            version,
            notable_release,
            notable_versions,
            previous_version,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name component of the path, for user-facing messages.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Whether the current version is flagged for prominent announcement.
    pub fn is_notable_release(&self) -> bool {
        self.notable_release
    }

    /// Versions previously recorded as notable, most recent first.
    pub fn notable_versions(&self) -> &[String] {
        &self.notable_versions
    }

    pub fn previous_version(&self) -> Option<&str> {
        self.previous_version.as_deref()
    }

    /// Rewrites the `version` property on disk.
    ///
    /// Other properties and comments are kept as they currently are on disk.
    pub fn set_version(&mut self, version: Version) -> VersionResult<()> {
        let text = read_text(&self.path)?;
        let updated = with_property(&text, VERSION_KEY, &version.to_string());
        write_atomic(&self.path, &updated)?;
        info!(
            "event=version_file_write module=version status=ok file={} version={}",
            self.path.display(),
            version
        );
        self.version = version;
        Ok(())
    }

    /// Increments the version on disk and returns the old/new pair.
    ///
    /// The file is re-read first so edits made after [`VersionFile::load`]
    /// are not lost. On error the file is left untouched.
    pub fn bump(&mut self, options: BumpOptions) -> VersionResult<VersionBump> {
        let result = self.bump_inner(options);
        if let Err(err) = &result {
            error!(
                "event=version_file_bump module=version status=error file={} error={}",
                self.path.display(),
                err
            );
        }
        result
    }

    fn bump_inner(&mut self, options: BumpOptions) -> VersionResult<VersionBump> {
        let text = read_text(&self.path)?;
        let current = Self::parse(self.path.clone(), &text)?;
        let next = current.version.bumped()?;
        let previous = current.version.to_string();

        let mut updated = with_property(&text, VERSION_KEY, &next.to_string());
        updated = with_property(&updated, PREVIOUS_VERSION_KEY, &previous);

        let mut notable_versions = current.notable_versions;
        if options.record_notable {
            notable_versions.insert(0, previous.clone());
            updated = with_property(&updated, NOTABLE_VERSIONS_KEY, &notable_versions.join(", "));
        }

        write_atomic(&self.path, &updated)?;
        info!(
            "event=version_file_bump module=version status=ok file={} previous={} current={} record_notable={}",
            self.path.display(),
            previous,
            next,
            options.record_notable
        );

        let bump = VersionBump {
            previous: current.version,
            current: next.clone(),
        };
        self.version = next;
        self.notable_release = current.notable_release;
        self.notable_versions = notable_versions;
        self.previous_version = Some(previous);
        Ok(bump)
    }
}

fn read_text(path: &Path) -> VersionResult<String> {
    std::fs::read_to_string(path).map_err(|source| VersionError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomic(path: &Path, contents: &str) -> VersionResult<()> {
    let io_error = |source: std::io::Error| VersionError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir).map_err(io_error)?;
    if let Ok(metadata) = std::fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(io_error)?;
    }
    temp.write_all(contents.as_bytes()).map_err(io_error)?;
    temp.persist(path).map_err(|err| io_error(err.error))?;
    Ok(())
}

/// Splits one properties line into `(key, value)`.
///
/// Returns `None` for blank lines, comments, and lines without a separator.
fn parse_property(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
        return None;
    }
    let separator = trimmed.find(['=', ':'])?;
    Some((
        trimmed[..separator].trim(),
        trimmed[separator + 1..].trim(),
    ))
}

fn parse_flag(key: &str, value: &str) -> VersionResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(VersionError::InvalidFlag {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Returns `text` with every `key` line set to `key=value`, appending the
/// property when the key is absent.
fn with_property(text: &str, key: &str, value: &str) -> String {
    let mut out = String::with_capacity(text.len() + key.len() + value.len() + 2);
    let mut replaced = false;

    for line in text.split_inclusive('\n') {
        if parse_property(line).is_some_and(|(line_key, _)| line_key == key) {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push_str(line_ending(line));
            replaced = true;
        } else {
            out.push_str(line);
        }
    }

    if !replaced {
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        out.push('\n');
    }
    out
}

fn line_ending(line: &str) -> &'static str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}
