//! Path resolution for Bazel file locations and labels

pub mod resolver;

pub use resolver::{BazelInfo, BazelPathsResolver};
