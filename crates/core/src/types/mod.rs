pub mod label;
pub mod language;
pub mod module;
pub mod project;
pub mod target;

// Re-export commonly used types
pub use label::Label;
pub use language::{Language, LanguageTable};
pub use module::{Module, SourceSet, Tag};
pub use project::Project;
pub use target::{Dependency, FileLocation, JavaOutputJars, JavaTargetInfo, ScalaTargetInfo, TargetRecord};
