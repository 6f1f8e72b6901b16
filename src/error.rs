use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a strip run.
///
/// `Read` and `Write` are file access failures; the target is never
/// modified when either is returned.
#[derive(Debug, Error)]
pub enum StripError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid trigger: {0}")]
    InvalidTrigger(String),
}

impl StripError {
    pub fn is_file_access(&self) -> bool {
        matches!(self, StripError::Read { .. } | StripError::Write { .. })
    }
}
