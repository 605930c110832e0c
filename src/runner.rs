use serde::Serialize;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

use crate::error::GitError;
use crate::invocation::Invocation;

/// Captured stdout/stderr from a completed git subprocess.
///
/// Both streams are raw text, captured in full. `lines()` splits stdout
/// into non-empty lines and `trimmed()` returns whitespace-stripped
/// stdout; neither interprets the content beyond that.
#[derive(Debug, Serialize)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    /// Splits stdout into non-empty lines, filtering out blank lines.
    pub fn lines(&self) -> Vec<&str> {
        self.stdout.lines().filter(|l| !l.is_empty()).collect()
    }

    /// Returns stdout with leading/trailing whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.stdout.trim()
    }
}

/// Low-level runner for one external binary, `git` unless overridden.
///
/// Every call goes through `tokio::process::Command` with
/// `GIT_TERMINAL_PROMPT=0` (prevents credential prompts from hanging) and
/// `LC_ALL=C` (ensures English, parseable output). Subprocesses are killed
/// on drop via `kill_on_drop(true)`. The runner holds no repository state;
/// scoping to a working tree lives in the invocation, not here.
#[derive(Debug, Clone)]
pub struct Git {
    program: String,
    limit: Option<Duration>,
}

impl Default for Git {
    fn default() -> Self {
        Self::new()
    }
}

impl Git {
    /// Creates a runner for the `git` binary on `$PATH`, waiting on each
    /// call for as long as it takes.
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
            limit: None,
        }
    }

    /// Creates a runner for a different binary, given as a name resolved
    /// on `$PATH` or as an absolute path.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            limit: None,
        }
    }

    /// Bounds each call's wait. When the limit expires the child is killed
    /// and the call fails like any other process failure.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The binary this runner launches.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Executes one invocation and returns its captured output.
    ///
    /// The child receives the argument vector directly; no shell is
    /// involved, so arguments are never re-quoted or re-split. A spawn
    /// failure, an expired wait, and a non-zero exit all surface as
    /// `CommandFailed`, carrying the reconstructed command line and
    /// whatever output was captured.
    pub async fn run(&self, invocation: &Invocation) -> Result<GitOutput, GitError> {
        let command_line = invocation.command_line(&self.program);
        log::debug!("{}", command_line);

        let mut cmd = Command::new(&self.program);
        cmd.args(invocation.argv())
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("LC_ALL", "C")
            .kill_on_drop(true);

        let waited = match self.limit {
            // Dropping the unfinished future kills the child (kill_on_drop).
            Some(limit) => timeout(limit, cmd.output()).await.map_err(|_| {
                GitError::CommandFailed {
                    code: -1,
                    stdout: String::new(),
                    stderr: format!("command timed out after {:?}: {}", limit, command_line),
                    command: command_line.clone(),
                }
            })?,
            None => cmd.output().await,
        };

        let output = waited.map_err(|source| GitError::CommandFailed {
            code: -1,
            stdout: String::new(),
            stderr: format!("failed to start {}: {}", self.program, source),
            command: command_line.clone(),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if log::log_enabled!(log::Level::Trace) {
            for line in stdout.lines().chain(stderr.lines()) {
                log::trace!("\t{}", line);
            }
        }

        if output.status.success() {
            Ok(GitOutput { stdout, stderr })
        } else {
            Err(GitError::CommandFailed {
                code: output.status.code().unwrap_or(-1),
                stdout,
                stderr: stderr.trim().to_string(),
                command: command_line,
            })
        }
    }
}
