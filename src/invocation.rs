use std::ffi::OsString;
use std::path::Path;

/// One git invocation: a subcommand plus the global flags and positional
/// arguments around it.
///
/// Built fresh for every call and never reused, so flags from one call
/// cannot leak into the next. `argv()` assembles the final vector as
/// flags, then the subcommand, then arguments; git rejects global flags
/// placed after the subcommand, so the order is load-bearing.
#[derive(Debug, Clone)]
pub struct Invocation {
    subcommand: String,
    flags: Vec<OsString>,
    args: Vec<OsString>,
}

impl Invocation {
    /// Creates an invocation with no flags and no arguments.
    pub fn new(subcommand: impl Into<String>) -> Self {
        Self {
            subcommand: subcommand.into(),
            flags: Vec::new(),
            args: Vec::new(),
        }
    }

    /// Creates an invocation scoped to the repository rooted at `tree`.
    ///
    /// Injects `--git-dir <tree>/.git --work-tree <tree>` ahead of any
    /// other flags, so the command targets `tree` no matter where the
    /// calling process happens to be running. `git -C <tree>` would be
    /// equivalent but requires git 1.8.5.
    pub fn in_worktree(subcommand: impl Into<String>, tree: &Path) -> Self {
        Self::new(subcommand)
            .flag("--git-dir")
            .flag(tree.join(".git"))
            .flag("--work-tree")
            .flag(tree)
    }

    /// Appends one global flag token (a flag name or its value).
    pub fn flag(mut self, flag: impl Into<OsString>) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// Appends several global flag tokens.
    pub fn flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.flags.extend(flags.into_iter().map(Into::into));
        self
    }

    /// Appends one positional argument, passed to the child verbatim.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several positional arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Assembles the full argument vector: flags, subcommand, arguments.
    ///
    /// This is exactly what the child process receives, inspectable before
    /// anything is executed.
    pub fn argv(&self) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(self.flags.len() + 1 + self.args.len());
        argv.extend(self.flags.iter().cloned());
        argv.push(OsString::from(&self.subcommand));
        argv.extend(self.args.iter().cloned());
        argv
    }

    /// Reconstructs the command line as `program` followed by the
    /// space-joined argument vector, for logs and error messages. Non-UTF-8
    /// arguments are rendered lossily; this string is diagnostic text, not
    /// something to re-execute.
    pub fn command_line(&self, program: &str) -> String {
        let mut line = String::from(program);
        for part in self.argv() {
            line.push(' ');
            line.push_str(&part.to_string_lossy());
        }
        line
    }
}
