//! Error type shared by the adapter, backends and tool runner

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised before or around a toolchain call.
///
/// A tool that runs and exits non-zero is not an error; its exit code is
/// returned to the caller instead.
#[derive(Error, Debug)]
pub enum CtdError {
    /// An input file or executable is missing
    #[error("'{}' does not exist. {hint}", path.display())]
    NotFound { path: PathBuf, hint: String },

    /// A path does not carry one of the accepted extensions
    #[error("File must be one of {expected:?}, but got {got:?} ('{}')", path.display())]
    InvalidExtension {
        path: PathBuf,
        expected: &'static [&'static str],
        got: String,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The geometry backend returned something that does not fit its contract
    #[error("Unexpected output from geometry backend: {0}")]
    UnexpectedBackendOutput(String),

    /// The geometry backend reported failure. `code` is -1 when the
    /// backend process was terminated by a signal.
    #[error("Geometry backend failed during {operation} (status {code})")]
    BackendFailed { operation: &'static str, code: i32 },

    #[error("Failed to launch '{}'", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CtdError {
    /// True for the configuration errors raised when a file or tool is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CtdError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, CtdError>;
