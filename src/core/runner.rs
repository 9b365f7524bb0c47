//! External command execution.
//!
//! Every platform call goes through a [`Runner`], so the same call sequence
//! can be executed for real, printed in dry-run mode, or scripted in tests.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::error::{PlatformError, Result};

/// Trailing stderr lines kept in a `CommandFailed` error.
const STDERR_TAIL_LINES: usize = 20;

/// A single external command: program, arguments and optional stdin payload.
#[derive(Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    stdin: Option<Zeroizing<String>>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
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

    /// Pipe `data` to the command's stdin. Never printed or logged.
    pub fn stdin(mut self, data: &str) -> Self {
        self.stdin = Some(Zeroizing::new(data.to_string()));
        self
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// The stdin payload. Test doubles use this to record uploaded values.
    pub fn stdin_data(&self) -> Option<&str> {
        self.stdin.as_ref().map(|s| s.as_str())
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        if self.stdin.is_some() {
            write!(f, " < <stdin>")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invocation({})", self)
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Convert a non-zero exit into `PlatformError::CommandFailed`.
    pub fn check(self, invocation: &Invocation) -> Result<Self> {
        if self.success() {
            return Ok(self);
        }
        Err(PlatformError::CommandFailed {
            command: invocation.to_string(),
            code: self.code,
            stderr: tail(&self.stderr, STDERR_TAIL_LINES),
        }
        .into())
    }
}

/// Last `lines` lines of `text`, noting how many were dropped.
fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.trim_end().lines().collect();
    if all.len() <= lines {
        return text.to_string();
    }
    let skipped = all.len() - lines;
    format!("[{} earlier lines omitted]\n{}", skipped, all[skipped..].join("\n"))
}

/// Executes invocations. Blocks until the command exits.
pub trait Runner {
    /// Run the invocation and capture its output.
    ///
    /// A non-zero exit is not an error here; callers decide via
    /// [`CommandOutput::check`].
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Spawn` if the program cannot be started and
    /// `PlatformError::Pipe` if talking to the running process fails.
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput>;

    /// Whether commands only get printed.
    fn is_dry_run(&self) -> bool {
        false
    }
}

impl<R: Runner + ?Sized> Runner for &R {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        (**self).run(invocation)
    }

    fn is_dry_run(&self) -> bool {
        (**self).is_dry_run()
    }
}

/// Runs commands as child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl Runner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        debug!(command = %invocation, "running");

        let spawn_err = |source| PlatformError::Spawn {
            program: invocation.program.clone(),
            source,
        };
        let pipe_err = |source| PlatformError::Pipe {
            program: invocation.program.clone(),
            source,
        };

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;

        if let (Some(mut stdin), Some(data)) = (child.stdin.take(), invocation.stdin.as_ref()) {
            match stdin.write_all(data.as_bytes()) {
                Ok(()) => {}
                // The child exited without reading its input; its exit
                // status and stderr carry the actual failure.
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    debug!(command = %invocation, "stdin closed before it was fully written");
                }
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(pipe_err(source).into());
                }
            }
            // Dropping stdin closes the pipe so the child sees EOF.
        }

        let output = child.wait_with_output().map_err(pipe_err)?;

        trace!(
            code = ?output.status.code(),
            stdout_len = output.stdout.len(),
            stderr_len = output.stderr.len(),
            "command finished"
        );

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Prints commands instead of running them. Every command "succeeds"
/// with empty output.
pub struct DryRunRunner<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> DryRunRunner<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> Runner for DryRunRunner<W> {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        debug!(command = %invocation, "dry run");
        writeln!(self.out.borrow_mut(), "  $ {}", invocation)?;
        Ok(CommandOutput::ok(""))
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}
