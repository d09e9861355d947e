use std::process::{Command, Output};
use tracing::{debug, trace};

use crate::error::QueryError;

/// A builder for executing read-only backend commands with unified error handling
pub struct Cmd<'a> {
    command: &'a str,
    args: Vec<&'a str>,
}

impl<'a> Cmd<'a> {
    /// Create a new command builder
    pub fn new(command: &'a str) -> Self {
        Self {
            command,
            args: Vec::new(),
        }
    }

    /// Add a single argument
    pub fn arg(mut self, arg: &'a str) -> Self {
        self.args.push(arg);
        self
    }

    /// Add multiple arguments
    pub fn args(mut self, args: &[&'a str]) -> Self {
        self.args.extend_from_slice(args);
        self
    }

    /// The full command line, as shown in diagnostics
    pub fn display(&self) -> String {
        std::iter::once(self.command)
            .chain(self.args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Execute the command and return the output
    /// Returns an error if the command fails (non-zero exit code)
    pub fn run(self) -> Result<Output, QueryError> {
        let display = self.display();
        let Cmd { command, args } = self;

        trace!(command, args = ?args, "cmd:run start");

        let output = Command::new(command)
            .args(&args)
            .output()
            .map_err(|source| QueryError::Spawn {
                command: display.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!(
                command,
                args = ?args,
                status = ?output.status.code(),
                stderr = %stderr,
                "cmd:run failure"
            );
            return Err(QueryError::Failed {
                command: display,
                status: output.status.code(),
                stderr,
            });
        }
        trace!(command, "cmd:run success");
        Ok(output)
    }

    /// Execute the command and return stdout as a trimmed string
    pub fn run_and_capture_stdout(self) -> Result<String, QueryError> {
        let display = self.display();
        let output = self.run()?;
        let stdout = String::from_utf8(output.stdout).map_err(|source| QueryError::Utf8 {
            command: display,
            source,
        })?;
        Ok(stdout.trim().to_string())
    }
}
