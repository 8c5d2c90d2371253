//! Typed errors for the core pipeline.
//!
//! "No match" is never an error: empty queries, unclassifiable text and
//! unknown categories all resolve to empty results or the fallback
//! category. These variants cover broken internal state only.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A writer panicked while holding a shared lock.
    #[error("lock poisoned by a panicked writer")]
    LockPoisoned,

    #[error("classifier model I/O failed for {path}: {source}")]
    ModelIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("classifier model at {path} is malformed: {source}")]
    ModelFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
