//! Error types for the harness

use std::path::PathBuf;
use std::process::ExitStatus;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON from {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status} for {}: {stderr}", path.display())]
    Interpreter {
        program: String,
        path: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("failed to list test directory {}: {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HarnessError {
    /// The file the error is about, when one is known.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            HarnessError::Read { path, .. }
            | HarnessError::Parse { path, .. }
            | HarnessError::Interpreter { path, .. }
            | HarnessError::Discovery { path, .. } => Some(path),
            HarnessError::Spawn { .. } => None,
        }
    }

    /// Read and parse failures of a results document.
    pub fn is_input_error(&self) -> bool {
        matches!(self, HarnessError::Read { .. } | HarnessError::Parse { .. })
    }
}
