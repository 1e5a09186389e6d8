//! Selection of root targets to import

use serde::{Deserialize, Serialize};

const EXCLUDED_PREFIX: char = '-';
const FULL_WORKSPACE_PATTERN: &str = "//...";

/// Target patterns of the project view, in file order.
///
/// Serialized as a plain list so `"targets": ["//...", "-//experimental/..."]`
/// reads naturally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectView {
    patterns: Vec<String>,
}

impl Default for ProjectView {
    fn default() -> Self {
        Self::new([FULL_WORKSPACE_PATTERN])
    }
}

impl ProjectView {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| {
                    let p: String = p.into();
                    p.trim().to_string()
                })
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn included(&self) -> Vec<&str> {
        self.patterns
            .iter()
            .filter(|p| !p.starts_with(EXCLUDED_PREFIX))
            .map(String::as_str)
            .collect()
    }

    pub fn excluded(&self) -> Vec<&str> {
        self.patterns
            .iter()
            .filter_map(|p| p.strip_prefix(EXCLUDED_PREFIX))
            .collect()
    }

    /// Any included pattern covering the whole workspace
    pub fn is_full_workspace_import(&self) -> bool {
        self.included()
            .iter()
            .any(|p| p.starts_with(FULL_WORKSPACE_PATTERN))
    }

    /// Patterns in the form `bazel build` expects (`-` excluded ones last)
    pub fn to_bazel_args(&self) -> Vec<String> {
        let mut args: Vec<String> = self.included().into_iter().map(str::to_string).collect();
        args.extend(self.excluded().into_iter().map(|p| format!("-{p}")));
        args
    }

    /// Whether `label` is selected: matched by an included pattern and by no
    /// excluded one
    pub fn matches(&self, label: &str) -> bool {
        self.included().iter().any(|p| pattern_matches(p, label))
            && !self.excluded().iter().any(|p| pattern_matches(p, label))
    }
}

fn pattern_matches(pattern: &str, label: &str) -> bool {
    if !label.starts_with("//") {
        return false;
    }
    let Some((package, _)) = label.split_once(':') else {
        return false;
    };

    if let Some(prefix) = pattern.strip_suffix("...").or_else(|| pattern.strip_suffix("...:all")) {
        let prefix = prefix.trim_end_matches('/');
        return prefix.is_empty()
            || package == prefix
            || package
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'));
    }

    match pattern.split_once(':') {
        Some((p, "all" | "*" | "all-targets")) => p == package,
        Some(_) => pattern == label,
        None => pattern == package,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_included_and_excluded() {
        let view = ProjectView::new(["//a/...", " -//a/gen/... ", "", "//b:b"]);
        assert_eq!(view.included(), vec!["//a/...", "//b:b"]);
        assert_eq!(view.excluded(), vec!["//a/gen/..."]);
        assert!(!view.is_full_workspace_import());
    }

    #[test]
    fn test_full_workspace_import() {
        assert!(ProjectView::new(["//...:all"]).is_full_workspace_import());
        assert!(!ProjectView::new(["-//...", "//x/..."]).is_full_workspace_import());
    }

    #[test]
    fn test_bazel_args_put_exclusions_last() {
        let view = ProjectView::new(["-//gen/...", "//..."]);
        assert_eq!(view.to_bazel_args(), vec!["//...", "-//gen/..."]);
    }

    #[test]
    fn test_matches_patterns() {
        let view = ProjectView::new(["//a/...", "-//a/gen/...", "//b:all", "//c:c"]);
        assert!(view.matches("//a:a"));
        assert!(view.matches("//a/x/y:z"));
        assert!(!view.matches("//a/gen:g"));
        assert!(!view.matches("//ab:ab"));
        assert!(view.matches("//b:anything"));
        assert!(!view.matches("//b/sub:x"));
        assert!(view.matches("//c:c"));
        assert!(!view.matches("//c:d"));
        assert!(ProjectView::default().matches("//deep/pkg:t"));
        assert!(ProjectView::new(["//c"]).matches("//c:lib"));
    }

    #[test]
    fn test_serializes_as_list() {
        let view: ProjectView = serde_json::from_str(r#"["//...", "-//tmp/..."]"#).unwrap();
        assert_eq!(serde_json::to_string(&view).unwrap(), r#"["//...","-//tmp/..."]"#);
    }
}
