//! Classify targets by rule kind

use crate::types::{Tag, TargetRecord};
use std::collections::BTreeSet;

/// Rule kind that bundles resources for several libraries
const RESOURCES_UNION_KIND: &str = "resources_union";

/// Raw Bazel tag that hides a target from the IDE
const NO_IDE_TAG: &str = "no-ide";

/// Maps a rule kind and its raw tags to semantic module tags
#[derive(Debug, Clone)]
pub struct TargetKindResolver {
    suffix_rules: Vec<(&'static str, Tag)>,
}

impl Default for TargetKindResolver {
    fn default() -> Self {
        Self {
            suffix_rules: vec![
                ("_library", Tag::Library),
                ("_binary", Tag::Application),
                ("_test", Tag::Test),
            ],
        }
    }
}

impl TargetKindResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve_tags(&self, target: &TargetRecord) -> BTreeSet<Tag> {
        let mut tags = if target.kind == RESOURCES_UNION_KIND {
            BTreeSet::from([Tag::Library])
        } else {
            self.tags_for_kind(&target.kind)
        };

        if target.tags.iter().any(|t| t == NO_IDE_TAG) {
            tags.insert(Tag::NoIde);
        }

        tags
    }

    fn tags_for_kind(&self, kind: &str) -> BTreeSet<Tag> {
        self.suffix_rules
            .iter()
            .filter(|(suffix, _)| kind.ends_with(suffix))
            .max_by_key(|(suffix, _)| suffix.len())
            .map(|(_, tag)| BTreeSet::from([*tag]))
            .unwrap_or_else(|| BTreeSet::from([Tag::NoIde]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(kind: &str, raw_tags: &[&str]) -> BTreeSet<Tag> {
        let record = TargetRecord::new("//pkg:name", kind).with_tags(raw_tags.iter().copied());
        TargetKindResolver::new().resolve_tags(&record)
    }

    #[test]
    fn test_library_kind() {
        assert_eq!(tags("java_library", &[]), BTreeSet::from([Tag::Library]));
    }

    #[test]
    fn test_binary_and_test_kinds() {
        assert_eq!(tags("scala_binary", &[]), BTreeSet::from([Tag::Application]));
        assert_eq!(tags("kt_jvm_test", &[]), BTreeSet::from([Tag::Test]));
    }

    #[test]
    fn test_no_ide_raw_tag_is_added() {
        assert_eq!(
            tags("scala_test", &["no-ide"]),
            BTreeSet::from([Tag::Test, Tag::NoIde])
        );
    }

    #[test]
    fn test_resources_union_is_library() {
        assert_eq!(tags("resources_union", &[]), BTreeSet::from([Tag::Library]));
    }

    #[test]
    fn test_unknown_kind_is_hidden() {
        assert_eq!(tags("genrule", &["manual"]), BTreeSet::from([Tag::NoIde]));
    }

    #[test]
    fn test_longest_suffix_wins() {
        let resolver = TargetKindResolver {
            suffix_rules: vec![("_test", Tag::Test), ("_suite_test", Tag::Manual)],
        };
        let record = TargetRecord::new("//pkg:t", "java_suite_test");
        assert_eq!(resolver.resolve_tags(&record), BTreeSet::from([Tag::Manual]));
    }
}
