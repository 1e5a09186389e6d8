//! Guess JVM source roots from `package` declarations

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn package_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*package\s+(object\s+)?([\w.]+)").expect("package pattern is a valid regex")
    })
}

/// Source root of a JVM file: its directory minus the package path.
///
/// With `multiple_lines`, consecutive `package` clauses are joined the way
/// Scala chains them (`package a` + `package b` == `package a.b`). Files that
/// cannot be read, have no package clause, or live in a directory that does
/// not end with the package path fall back to their own directory.
pub fn calculate_jvm_source_root(source: &Path, multiple_lines: bool) -> Option<PathBuf> {
    let directory = source.parent()?.to_path_buf();

    let Some(package) = find_package(source, multiple_lines) else {
        return Some(directory);
    };

    let segments: Vec<&str> = package.split('.').filter(|s| !s.is_empty()).collect();
    let mut root = directory.clone();
    for segment in segments.iter().rev() {
        if root.file_name().and_then(|n| n.to_str()) != Some(*segment) {
            tracing::debug!(
                "{} declares package {} which does not match its directory",
                source.display(),
                package
            );
            return Some(directory);
        }
        root.pop();
    }
    Some(root)
}

fn find_package(source: &Path, multiple_lines: bool) -> Option<String> {
    let content = match std::fs::read_to_string(source) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("Cannot read {} for package detection: {}", source.display(), e);
            return None;
        }
    };

    let mut packages = content
        .lines()
        .filter_map(|line| package_pattern().captures(line))
        // `package object foo` declares a member, not a package segment
        .filter(|captures| captures.get(1).is_none())
        .filter_map(|captures| captures.get(2))
        .map(|m| m.as_str().to_string());

    if multiple_lines {
        let all: Vec<String> = packages.collect();
        (!all.is_empty()).then(|| all.join("."))
    } else {
        packages.next()
    }
}
