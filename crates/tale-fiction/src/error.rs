//! Error types for command interpretation and story loading.

use std::path::PathBuf;

use tale_core::CoreError;
use thiserror::Error;

/// Result type for fiction operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Errors that can occur while loading or playing a story.
#[derive(Debug, Error)]
pub enum FictionError {
    /// The story itself is malformed or a mutation was refused.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A verb body returned an error. Changes it made before failing stay.
    #[error("verb \"{verb}\" failed: {source}")]
    Verb {
        /// Name of the verb that ran.
        verb: String,
        /// What the body reported.
        source: CoreError,
    },

    /// A story file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A story file is not valid JSON or has the wrong shape.
    #[error("invalid story file: {0}")]
    Parse(#[from] serde_json::Error),
}
