use std::io;

/// Errors that can occur while resolving a Bazel project
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed label {label}: {reason}")]
    MalformedLabel { label: String, reason: String },

    #[error("Target {label} not found in action graph; known targets: [{}]", .known.join(", "))]
    TargetNotFound { label: String, known: Vec<String> },

    #[error("Cannot merge language data of kinds {left} and {right}")]
    MergeUnsupported { left: String, right: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Project resolution was cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn malformed_label(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedLabel {
            label: label.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for bazel-bridge operations
pub type Result<T> = std::result::Result<T, Error>;
