//! Release version number model.

use super::{VersionError, VersionResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-([A-Za-z0-9]+)\.(0|[1-9]\d*))?$")
        .expect("valid version regex")
});

/// Pre-release suffix such as `beta.4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreRelease {
    pub label: String,
    pub number: u64,
}

/// Release version `MAJOR.MINOR.PATCH` with an optional `-LABEL.N` suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: Option<PreRelease>,
}

impl Version {
    /// Parses a version string, ignoring surrounding whitespace.
    ///
    /// # Errors
    /// - Returns `VersionError::InvalidVersion` for any text outside the
    ///   supported grammar, including leading zeros and numeric components
    ///   that overflow `u64`.
    pub fn parse(value: &str) -> VersionResult<Self> {
        let trimmed = value.trim();
        let invalid = || VersionError::InvalidVersion(trimmed.to_string());
        let captures = VERSION_RE.captures(trimmed).ok_or_else(invalid)?;
        let component = |index: usize| -> VersionResult<u64> {
            captures[index].parse::<u64>().map_err(|_| invalid())
        };

        let pre_release = match captures.get(4) {
            Some(label) => Some(PreRelease {
                label: label.as_str().to_string(),
                number: component(5)?,
            }),
            None => None,
        };

        Ok(Self {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
            pre_release,
        })
    }

    /// Returns the next version.
    ///
    /// Pre-release versions increment their counter (`1.0.0-beta.2` ->
    /// `1.0.0-beta.3`); plain versions increment the patch component.
    pub fn bumped(&self) -> VersionResult<Self> {
        let overflow = || VersionError::Overflow(self.to_string());
        let mut next = self.clone();
        match next.pre_release.as_mut() {
            Some(pre) => pre.number = pre.number.checked_add(1).ok_or_else(overflow)?,
            None => next.patch = next.patch.checked_add(1).ok_or_else(overflow)?,
        }
        Ok(next)
    }

    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre_release {
            write!(f, "-{}.{}", pre.label, pre.number)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PreRelease, Version};
    use crate::version::VersionError;

    #[test]
    fn parses_plain_version() {
        let version = Version::parse(" 1.20.123 ").expect("plain version should parse");
        assert_eq!(version.major, 1);
        assert_eq!(version.minor, 20);
        assert_eq!(version.patch, 123);
        assert!(!version.is_pre_release());
    }

    #[test]
    fn parses_pre_release_version() {
        let version = Version::parse("2.0.0-beta.4").expect("pre-release should parse");
        assert_eq!(
            version.pre_release,
            Some(PreRelease {
                label: "beta".to_string(),
                number: 4,
            })
        );
        assert_eq!(version.to_string(), "2.0.0-beta.4");
    }

    #[test]
    fn rejects_unsupported_formats() {
        for raw in ["", "1", "1.0", "v1.0.0", "1.0.0.0", "1.0.0-beta", "1.0.x", "01.0.0"] {
            let err = Version::parse(raw).expect_err("format must be rejected");
            assert!(
                matches!(err, VersionError::InvalidVersion(_)),
                "unexpected error for `{raw}`: {err}"
            );
        }
    }

    #[test]
    fn rejects_component_overflowing_u64() {
        let err = Version::parse("1.0.99999999999999999999").unwrap_err();
        assert!(matches!(err, VersionError::InvalidVersion(_)));
    }

    #[test]
    fn bump_increments_patch_only() {
        let next = Version::parse("1.9.9").unwrap().bumped().unwrap();
        assert_eq!(next.to_string(), "1.9.10");
    }

    #[test]
    fn bump_increments_pre_release_counter_only() {
        let next = Version::parse("1.0.0-rc.9").unwrap().bumped().unwrap();
        assert_eq!(next.to_string(), "1.0.0-rc.10");
    }

    #[test]
    fn bump_reports_overflow() {
        let version = Version::parse(&format!("0.0.{}", u64::MAX)).unwrap();
        let err = version.bumped().unwrap_err();
        assert!(matches!(err, VersionError::Overflow(_)));
    }
}
