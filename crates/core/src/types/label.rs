use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical identifier of a build target, e.g. `//pkg:name` or `@repo//pkg:name`.
///
/// Equality is plain string equality; no normalization happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Targets of the main repository start with `//`.
    pub fn is_main_workspace(&self) -> bool {
        self.0.starts_with("//")
    }

    /// Package part of the label (`pkg/sub` for `//pkg/sub:name`).
    pub fn package(&self) -> Option<&str> {
        let start = self.0.find("//")? + 2;
        let rest = &self.0[start..];
        Some(rest.split_once(':').map_or(rest, |(pkg, _)| pkg))
    }

    /// Target name (`name` for `//pkg:name`).
    pub fn name(&self) -> Option<&str> {
        self.0.rsplit_once(':').map(|(_, name)| name)
    }

    /// Copy of this label with the target name replaced.
    ///
    /// Labels without a `:` are returned unchanged.
    pub fn with_name(&self, name: &str) -> Label {
        match self.0.rfind(':') {
            Some(colon) => Label(format!("{}:{}", &self.0[..colon], name)),
            None => self.clone(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::new(value)
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label(value)
    }
}
