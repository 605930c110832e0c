use std::path::PathBuf;

/// All possible errors from repository operations, serialized as a string
/// to embedding applications via the custom `Serialize` impl below.
///
/// Process trouble of every kind folds into [`CommandFailed`]: a non-zero
/// exit, a binary that could not be launched, and an expired bounded wait
/// all land there, distinguished only by the captured text and exit code.
///
/// [`CommandFailed`]: GitError::CommandFailed
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// A git invocation did not run to successful completion.
    ///
    /// `command` is the reconstructed command line, `stdout` and `stderr`
    /// whatever the process wrote before failing. `code` is the exit code,
    /// or -1 when none exists (spawn failure, expired wait, killed by
    /// signal).
    #[error("`{command}` failed (exit code {code}): {stderr}")]
    CommandFailed {
        code: i32,
        stdout: String,
        stderr: String,
        command: String,
    },

    /// The path handed to [`Repository::new`] does not exist on disk.
    ///
    /// [`Repository::new`]: crate::Repository::new
    #[error("repository path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// The per-repository exclusion file could not be opened or appended
    /// to, typically because the metadata directory is missing.
    #[error("failed to append to exclusion file {path}: {source}")]
    ExcludeFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Serializes the error as its `Display` string so embedding applications
/// receive a single human-readable message rather than a tagged enum
/// structure.
impl serde::Serialize for GitError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
