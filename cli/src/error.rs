//! Error types for the `targetinfo` command-line tool.
//!
//! Lookups of unknown targets are not errors: the query commands report them
//! through their exit status. Errors cover configuration problems and
//! failures while running a resolved executable.

use camino::Utf8PathBuf;
use targetinfo::{RegistryError, TargetUid};
use thiserror::Error;

/// Exit status for errors that do not carry a child exit code.
pub const ERROR_EXIT_CODE: i32 = 2;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The registry could not be built.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The requested target is neither registered nor found on `PATH`.
    #[error("unknown target {uid}: not in the registry and not found on PATH")]
    UnknownTarget {
        /// Normalised UID of the requested target.
        uid: TargetUid,
    },

    /// The executable could not be started.
    #[error("failed to run {program}")]
    Spawn {
        /// Path of the executable.
        program: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The executable exited unsuccessfully.
    #[error("command failed with exit code {code}: {command}")]
    CommandFailed {
        /// The quoted command line.
        command: String,
        /// Exit code of the child process.
        code: i32,
    },

    /// Failed to write output.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    /// Process exit status for this error.
    ///
    /// A failed child propagates its own exit code; everything else maps to
    /// [`ERROR_EXIT_CODE`].
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { code, .. } => *code,
            _ => ERROR_EXIT_CODE,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(source: std::io::Error) -> Self {
        Self::WriteFailed { source }
    }
}

/// Result type alias using [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;
