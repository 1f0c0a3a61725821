//! Release version number and version file handling.
//!
//! # Responsibility
//! - Parse and increment release version numbers.
//! - Load, bump and rewrite the flat `version.properties` file.
//!
//! # Invariants
//! - A bump changes exactly one version component.
//! - Rewrites preserve unknown keys and comments verbatim.
//! - A failed bump never leaves a partially written file behind.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod file;
mod number;

pub use file::{BumpOptions, VersionBump, VersionFile, DEFAULT_VERSION_FILE_NAME};
pub use number::{PreRelease, Version};

pub type VersionResult<T> = Result<T, VersionError>;

/// Errors raised while reading, parsing or rewriting release versions.
#[derive(Debug)]
pub enum VersionError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    MissingVersion {
        path: PathBuf,
    },
    InvalidVersion(String),
    InvalidFlag {
        key: String,
        value: String,
    },
    Overflow(String),
}

impl Display for VersionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to access version file `{}`: {source}", path.display())
            }
            Self::MissingVersion { path } => write!(
                f,
                "version file `{}` does not declare a `version` property",
                path.display()
            ),
            Self::InvalidVersion(value) => write!(
                f,
                "unsupported version `{value}`; expected e.g. 1.0.0, 1.20.123 or 2.0.0-beta.4"
            ),
            Self::InvalidFlag { key, value } => {
                write!(f, "property `{key}` must be true or false, got `{value}`")
            }
            Self::Overflow(value) => write!(f, "cannot increment version `{value}`: overflow"),
        }
    }
}

impl Error for VersionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::MissingVersion { .. } => None,
            Self::InvalidVersion(_) => None,
            Self::InvalidFlag { .. } => None,
            Self::Overflow(_) => None,
        }
    }
}
