//! External command execution behind a narrow, mockable seam.
//!
//! Every shell-out in the pipeline goes through [`CommandRunner`] so tests
//! can script tool behavior without hdiutil, codesign, or openssl installed.

use crate::error::{Error, Result};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;

/// One external tool invocation: program, arguments, optional stdin bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name resolved via PATH
    pub program: String,

    /// Arguments in order
    pub args: Vec<String>,

    /// Bytes written to the child's stdin before waiting, if any
    pub stdin: Option<Vec<u8>>,
}

impl CommandSpec {
    /// Create a spec with no arguments and no stdin.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Append arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the stdin bytes.
    pub fn stdin(mut self, bytes: Vec<u8>) -> Self {
        self.stdin = Some(bytes);
        self
    }
}

/// Captured result of an external tool invocation.
#[derive(Clone, Debug)]
pub struct CommandOutput {
    /// Exit code, None when terminated by a signal
    pub code: Option<i32>,

    /// Captured standard output
    pub stdout: Vec<u8>,

    /// Captured standard error
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Whether the tool exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Convert a non-zero exit into an error carrying the captured stderr.
    pub fn ensure_success(self, program: &str) -> Result<Self> {
        if self.success() {
            return Ok(self);
        }
        let status = match self.code {
            Some(code) => format!("exit code {}", code),
            None => "signal".to_string(),
        };
        Err(Error::CommandFailed {
            program: program.to_string(),
            status,
            stderr: String::from_utf8_lossy(&self.stderr).trim().to_string(),
        })
    }

}

/// Runs external tools and captures their output.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run the command to completion, capturing stdout and stderr.
    ///
    /// A spawn failure is an error; a non-zero exit is not. Call sites
    /// decide via [`CommandOutput::ensure_success`].
    async fn run(&self, spec: CommandSpec) -> Result<CommandOutput>;
}

/// Production runner backed by `tokio::process`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, spec: CommandSpec) -> Result<CommandOutput> {
        log::debug!("running {} {}", spec.program, spec.args.join(" "));

        let mut command = tokio::process::Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(if spec.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|e| Error::Spawn {
            program: spec.program.clone(),
            source: e,
        })?;

        if let Some(bytes) = &spec.stdin {
            // Take stdin so the pipe closes once the bytes are written;
            // otherwise the child blocks waiting for EOF.
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(bytes).await?;
            }
        }

        let output = child.wait_with_output().await?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
