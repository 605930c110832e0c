//! Run git against a chosen working tree and get diagnosable failures back.
//!
//! [`Repository`] binds a filesystem path (checked to exist once, at
//! construction) and exposes the lifecycle operations as methods: `init`,
//! `add`, `commit`, `checkout`, `fetch`, `pull`, `push`, `set_remote`, and
//! `exclude`, plus `op` for any subcommand they don't cover. Each call is
//! an independent subprocess scoped to the path with
//! `--git-dir`/`--work-tree`, its output streams captured in full. A
//! failure of any kind comes back as [`GitError::CommandFailed`] carrying
//! the reconstructed command line, the exit code, and the captured text,
//! so the error alone is enough to reproduce and diagnose the call.
//!
//! [`Git`] and [`Invocation`] are the lower layer: a runner for one binary
//! and the argument vector handed to it. They work on their own for
//! invocations that have no working tree to scope to.
//!
//! ```no_run
//! use gitrun::Repository;
//!
//! # async fn demo() -> Result<(), gitrun::GitError> {
//! let repo = Repository::new("/work/project")?;
//! repo.init().await?;
//! repo.add(&["src/main.rs"]).await?;
//! repo.commit("first cut").await?;
//! repo.exclude(&["*.log", "target/"]).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Output is raw text; nothing here parses git's answers into domain
//! objects, and credentials are git's business, not this crate's.

pub mod error;
pub mod invocation;
pub mod repo;
pub mod runner;

pub use error::GitError;
pub use invocation::Invocation;
pub use repo::{is_repository, Repository};
pub use runner::{Git, GitOutput};
