// src/collector/command.rs
//! Running external tools and decoding their JSON output.

use serde::de::DeserializeOwned;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

use crate::error::{CollectorError, Result};

/// An external program plus any leading arguments placed before the
/// per-call arguments.
#[derive(Debug, Clone)]
pub struct Tool {
    program: String,
    args: Vec<String>,
}

/// Captured result of one tool invocation.
#[derive(Debug)]
pub struct ToolOutput {
    pub command: String,
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl Tool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Tool invoked as `program args... <call args>`.
    pub fn with_args<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Human readable command line, used in logs and error messages.
    /// Leading arguments are left out so wrapper scripts do not flood the output.
    pub fn command_line(&self, args: &[&str]) -> String {
        let mut line = self.program.clone();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Function to run the tool once and capture everything it printed.
    /// Blocks the calling task until the process exits; there is no timeout.
    pub async fn run(&self, args: &[&str]) -> Result<ToolOutput> {
        let command = self.command_line(args);
        debug!(%command, "running external tool");

        let output = Command::new(&self.program)
            .args(&self.args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| CollectorError::Spawn {
                command: command.clone(),
                source,
            })?;

        Ok(ToolOutput {
            command,
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

impl ToolOutput {
    /// Function to decode stdout as `T`.
    ///
    /// A nonzero exit is tolerated as long as stdout still decodes; otherwise
    /// the failure is reported with the tool's stderr so the exit status is
    /// not lost behind a JSON syntax error.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        match serde_json::from_slice(&self.stdout) {
            Ok(value) => {
                if !self.status.success() {
                    debug!(
                        command = %self.command,
                        status = %self.status,
                        "tool exited nonzero but printed JSON"
                    );
                }
                Ok(value)
            }
            Err(source) if self.status.success() => Err(CollectorError::Parse {
                command: self.command.clone(),
                source,
            }),
            Err(_) => Err(self.exit_error(self.stderr_message())),
        }
    }

    /// Builds an `Exit` error for this invocation with the given message.
    pub fn exit_error(&self, message: String) -> CollectorError {
        CollectorError::Exit {
            command: self.command.clone(),
            status: self.status.to_string(),
            message,
        }
    }

    fn stderr_message(&self) -> String {
        let stderr = String::from_utf8_lossy(&self.stderr);
        let stderr = stderr.trim();
        if stderr.is_empty() {
            "no error output".to_string()
        } else {
            stderr.to_string()
        }
    }
}
