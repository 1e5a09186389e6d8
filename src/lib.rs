//! Workspace package hosting the end-to-end tests in `tests/`.

pub use bazel_bridge_core::*;
