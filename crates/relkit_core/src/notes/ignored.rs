//! Ignore list for release-note credits.

use super::contributor::Contributor;
use super::predicate::Predicate;

/// Matches contributors whose name or login is on a fixed ignore list.
///
/// Matching is an exact string comparison against every entry; list order
/// has no effect on the outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoredContributor {
    ignored: Vec<String>,
}

impl IgnoredContributor {
    /// Ignore list that matches nobody.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn of<I, S>(ignored: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignored: ignored.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `value` equals one of the ignored entries.
    pub fn is_ignored_name(&self, value: &str) -> bool {
        self.ignored.iter().any(|ignored| ignored == value)
    }

    pub fn entries(&self) -> &[String] {
        &self.ignored
    }

    pub fn is_empty(&self) -> bool {
        self.ignored.is_empty()
    }
}

impl Predicate<Contributor> for IgnoredContributor {
    fn is_true(&self, contributor: &Contributor) -> bool {
        let by_name = contributor
            .name
            .as_deref()
            .is_some_and(|name| self.is_ignored_name(name));
        let by_login = contributor
            .login
            .as_deref()
            .is_some_and(|login| self.is_ignored_name(login));
        by_name || by_login
    }
}

#[cfg(test)]
mod tests {
    use super::IgnoredContributor;
    use crate::notes::{Contributor, Predicate};

    #[test]
    fn none_matches_nobody() {
        let ignored = IgnoredContributor::none();
        assert!(ignored.is_empty());
        assert!(!ignored.is_ignored_name(""));
        assert!(!ignored.is_true(&Contributor::new(Some("bot"), Some("Bot"))));
    }

    #[test]
    fn matches_on_name_or_login() {
        let ignored = IgnoredContributor::of(["release-bot", "Continuous Delivery Drone"]);
        assert!(ignored.is_true(&Contributor::new(Some("release-bot"), None)));
        assert!(ignored.is_true(&Contributor::new(
            Some("drone"),
            Some("Continuous Delivery Drone")
        )));
        assert!(!ignored.is_true(&Contributor::new(Some("mockitoguy"), Some("Mockito Guy"))));
    }

    #[test]
    fn comparison_is_exact() {
        let ignored = IgnoredContributor::of(vec!["release-bot".to_string()]);
        assert!(!ignored.is_ignored_name("Release-Bot"));
        assert!(!ignored.is_ignored_name("release-bot "));
        assert!(!ignored.is_ignored_name("release"));
    }
}
