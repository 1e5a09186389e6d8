use crate::impl_case_insensitive_deserialize;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Java,
    Kotlin,
    Scala,
    Cpp,
    Python,
    Thrift,
    Rust,
}

impl_case_insensitive_deserialize!(
    Language,
    Java => "java",
    Kotlin => "kotlin",
    Scala => "scala",
    Cpp => "cpp",
    Python => "python",
    Thrift => "thrift",
    Rust => "rust"
);

impl Language {
    pub fn name(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Kotlin => "kotlin",
            Language::Scala => "scala",
            Language::Cpp => "cpp",
            Language::Python => "python",
            Language::Thrift => "thrift",
            Language::Rust => "rust",
        }
    }
}

/// Extension → language table used to infer a module's languages.
///
/// One extension may map to several languages: Kotlin sources are also
/// registered as Java because the IDE needs the Java toolchain for interop.
#[derive(Debug, Clone)]
pub struct LanguageTable {
    entries: Vec<(String, Language)>,
}

impl Default for LanguageTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.register(".java", Language::Java);
        table.register(".kt", Language::Kotlin);
        table.register(".kt", Language::Java);
        table.register(".scala", Language::Scala);
        for ext in [".c", ".cc", ".cpp", ".h", ".hh", ".hpp"] {
            table.register(ext, Language::Cpp);
        }
        table.register(".py", Language::Python);
        table.register(".thrift", Language::Thrift);
        table.register(".rs", Language::Rust);
        table
    }
}

impl LanguageTable {
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn register(&mut self, extension: impl Into<String>, language: Language) {
        let extension = extension.into();
        if !self.entries.iter().any(|(e, l)| *e == extension && *l == language) {
            self.entries.push((extension, language));
        }
    }

    /// All languages whose extensions match the given file path.
    pub fn languages_of(&self, path: &str) -> BTreeSet<Language> {
        self.entries
            .iter()
            .filter(|(ext, _)| path.ends_with(ext.as_str()))
            .map(|(_, language)| *language)
            .collect()
    }
}
