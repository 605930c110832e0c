use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::GitError;
use crate::invocation::Invocation;
use crate::runner::{Git, GitOutput};

/// Returns true when `path` contains a repository metadata directory
/// (`<path>/.git`). Cheap filesystem probe, no handle and no subprocess;
/// says nothing about whether `path` itself exists.
pub fn is_repository(path: impl AsRef<Path>) -> bool {
    path.as_ref().join(".git").exists()
}

/// A handle to one working tree, through which all operations are issued.
///
/// The path is checked for existence once, at construction. Operations are
/// independent subprocesses scoped to that path via the invocation's
/// `--git-dir`/`--work-tree` flags; nothing is cached between calls and
/// handles never share state, so two handles on different paths never
/// interfere.
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
    runner: Git,
}

impl Repository {
    /// Creates a handle for the directory at `path`.
    ///
    /// Fails with `PathNotFound` when the path does not exist. The
    /// directory need not be a repository yet; `init` can make it one.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, GitError> {
        let path = path.into();
        if !path.exists() {
            return Err(GitError::PathNotFound { path });
        }
        Ok(Self {
            path,
            runner: Git::new(),
        })
    }

    /// Replaces the default runner, e.g. to target a nonstandard binary or
    /// to bound each call's wait.
    pub fn with_runner(mut self, runner: Git) -> Self {
        self.runner = runner;
        self
    }

    /// The working tree this handle is bound to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs an arbitrary subcommand scoped to this working tree.
    ///
    /// `flags` are global git flags and land between the scoping flags and
    /// the subcommand; `args` follow the subcommand verbatim. All the named
    /// operations below route through here, and anything git can do that
    /// they don't cover is reachable the same way.
    pub async fn op(
        &self,
        subcommand: &str,
        flags: &[&str],
        args: &[&str],
    ) -> Result<GitOutput, GitError> {
        let invocation = Invocation::in_worktree(subcommand, &self.path)
            .flags(flags)
            .args(args);
        self.runner.run(&invocation).await
    }

    /// Initializes a repository at the handle's path. Safe to repeat; git
    /// reinitializes an existing repository in place.
    pub async fn init(&self) -> Result<GitOutput, GitError> {
        self.op("init", &[], &[]).await
    }

    /// Stages the given paths, interpreted relative to the working tree.
    pub async fn add(&self, paths: &[&str]) -> Result<GitOutput, GitError> {
        self.op("add", &[], paths).await
    }

    /// Passes `args` straight to `git checkout`: a ref, a branch, or
    /// pathspec forms like `["--", "file"]`.
    pub async fn checkout(&self, args: &[&str]) -> Result<GitOutput, GitError> {
        self.op("checkout", &[], args).await
    }

    /// Commits staged and tracked-modified changes with the given message.
    ///
    /// The message travels as a single argument vector element, so it
    /// needs no shell quoting and may itself contain quotes.
    pub async fn commit(&self, message: &str) -> Result<GitOutput, GitError> {
        self.op("commit", &[], &["-am", message]).await
    }

    /// Fetches from the named remote.
    pub async fn fetch(&self, remote: &str) -> Result<GitOutput, GitError> {
        self.op("fetch", &[], &[remote]).await
    }

    /// Pulls `branch` from the named remote into the current branch.
    pub async fn pull(&self, remote: &str, branch: &str) -> Result<GitOutput, GitError> {
        self.op("pull", &[], &[remote, branch]).await
    }

    /// Pushes `branch` to the named remote.
    pub async fn push(&self, remote: &str, branch: &str) -> Result<GitOutput, GitError> {
        self.op("push", &[], &[remote, branch]).await
    }

    /// Points the named remote at `url`, creating it when absent.
    ///
    /// Runs `remote add` and then `remote set-url`. An `add` that fails
    /// because the remote already exists is the expected case and is
    /// skipped over; any other `add` failure propagates before `set-url`
    /// runs.
    pub async fn set_remote(&self, remote: &str, url: &str) -> Result<GitOutput, GitError> {
        match self.op("remote", &[], &["add", remote, url]).await {
            Ok(_) => {}
            Err(GitError::CommandFailed { ref stderr, .. })
                if stderr.contains("already exists") => {}
            Err(e) => return Err(e),
        }
        self.op("remote", &[], &["set-url", remote, url]).await
    }

    /// Appends ignore patterns to `.git/info/exclude`, one per line, in
    /// the order given.
    ///
    /// Unlike `.gitignore` the exclusion file is local to this repository
    /// and never committed. The file is created if missing, but the open
    /// fails when `.git/info` itself is absent: excluding only means
    /// anything on an initialized repository. The append is not
    /// transactional; patterns written before a failure stay in the file.
    pub async fn exclude(&self, patterns: &[&str]) -> Result<(), GitError> {
        let path = self.path.join(".git").join("info").join("exclude");

        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .await
            .map_err(|source| GitError::ExcludeFailed {
                path: path.clone(),
                source,
            })?;

        for pattern in patterns {
            file.write_all(format!("{}\n", pattern).as_bytes())
                .await
                .map_err(|source| GitError::ExcludeFailed {
                    path: path.clone(),
                    source,
                })?;
        }

        // tokio buffers file writes; unflushed patterns would vanish when
        // the handle drops.
        file.flush().await.map_err(|source| GitError::ExcludeFailed {
            path: path.clone(),
            source,
        })?;

        log::debug!(
            "appended {} pattern(s) to {}",
            patterns.len(),
            path.display()
        );
        Ok(())
    }
}
