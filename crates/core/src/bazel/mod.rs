//! Bazel metadata: rule-kind classification, dependency index and action graph

pub mod action_graph;
pub mod dependency_graph;
pub mod target_kind;

pub use action_graph::{ActionGraphContainer, ActionGraphParser};
pub use dependency_graph::DependencyGraph;
pub use target_kind::TargetKindResolver;
