//! Command Runner Port
//!
//! Runs an external program with an explicit argument vector, captures its
//! output and enforces a timeout.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Timeout applied when a spec does not set one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// stderr reported for a command killed by its timeout
pub const TIMEOUT_MARKER: &str = "Timeout";

/// A program invocation: no shell, no metacharacter processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Extra entries layered over the inherited environment
    pub env: Vec<(String, String)>,
    pub cwd: Option<PathBuf>,
    pub timeout: Duration,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            cwd: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Result of one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// True iff the process exited with status 0
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl CommandOutcome {
    pub fn timed_out(stdout: String) -> Self {
        Self {
            success: false,
            code: None,
            stdout,
            stderr: TIMEOUT_MARKER.to_string(),
            timed_out: true,
        }
    }
}

/// Runs commands to completion or timeout
///
/// Implementations:
/// - `SystemCommandRunner`: real child processes
/// - test doubles that fabricate build output
pub trait CommandRunner {
    /// Spawn errors surface as `Err`; a non-zero exit or timeout is an
    /// `Ok` outcome with `success == false`.
    fn run(&self, spec: &CommandSpec) -> std::io::Result<CommandOutcome>;
}
