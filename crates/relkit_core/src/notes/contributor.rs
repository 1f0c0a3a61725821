//! Contributor model and credit list assembly.

use super::predicate::Predicate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Person credited in release notes.
///
/// Git authors usually carry only a display name, hosted-repository users
/// carry a login and sometimes a name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
}

impl Contributor {
    pub fn new(login: Option<&str>, name: Option<&str>) -> Self {
        Self {
            login: login.map(str::to_string),
            name: name.map(str::to_string),
            profile_url: None,
        }
    }

    /// Identity used for de-duplication: the login when present, else the name.
    pub fn identity(&self) -> Option<&str> {
        self.login.as_deref().or(self.name.as_deref())
    }

    fn identity_key(&self) -> Option<IdentityKey> {
        match (&self.login, &self.name) {
            (Some(login), _) => Some(IdentityKey::Login(login.clone())),
            (None, Some(name)) => Some(IdentityKey::Name(name.clone())),
            (None, None) => None,
        }
    }
}

/// Logins and display names live in separate namespaces: a git author named
/// `alex` is not the hosted user `alex`.
#[derive(Debug, PartialEq, Eq, Hash)]
enum IdentityKey {
    Login(String),
    Name(String),
}

/// Builds the credit list for a release.
///
/// Drops every contributor matched by `ignored`, then de-duplicates by
/// [`Contributor::identity`] keeping the first occurrence. A login only
/// collides with another login and a name only with another name.
/// Contributors with neither login nor name are dropped as well.
pub fn release_contributors<I, P>(contributors: I, ignored: &P) -> Vec<Contributor>
where
    I: IntoIterator<Item = Contributor>,
    P: Predicate<Contributor> + ?Sized,
{
    let mut seen = HashSet::new();
    contributors
        .into_iter()
        .filter(|contributor| !ignored.is_true(contributor))
        .filter(|contributor| match contributor.identity_key() {
            Some(key) => seen.insert(key),
            None => false,
        })
        .collect()
}
