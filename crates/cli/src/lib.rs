pub mod cli;
pub mod commands;
pub mod display;
pub mod source;

// Re-export commonly used items
pub use cli::{Cli, Commands};
pub use source::DirectoryTargetInfoSource;
