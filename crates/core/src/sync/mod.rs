//! Project synchronization: aspect output in, [`Project`](crate::types::Project) out

pub mod mapper;
pub mod merger;
pub mod reader;
pub mod resolver;
pub mod tree_fix;

pub use mapper::ProjectMapper;
pub use merger::{MERGED_TARGET_NAME, ModuleMerger};
pub use reader::{TARGET_INFO_SUFFIX, TargetInfoReader};
pub use resolver::{FetchedTargets, ProjectResolver, TargetInfoSource};
pub use tree_fix::{TreeSynthesizer, WORKSPACE_ROOT_MODULE};
