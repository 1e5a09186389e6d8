//! Shared helpers

pub mod serde_helpers;
pub mod timing;

pub use timing::timed;
