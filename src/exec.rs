//! External Command Capability
//!
//! Every external tool midoctl drives (`cargo`, `wsl`, `rsync`, `ssh`, `git`)
//! goes through the [`CommandRunner`] trait so the orchestration logic can be
//! exercised against a mock instead of the real machine.

use std::{
    fmt,
    io,
    process::{Command, Stdio},
};

#[cfg(test)]
use mockall::automock;

/// A fully spelled-out external command invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Builds a command line from a program and its arguments.
    pub fn new<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandLine {
    /// Renders the invocation the way an operator would retype it, quoting
    /// arguments that contain whitespace.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;

        for arg in &self.args {
            if arg.chars().any(char::is_whitespace) {
                write!(f, " '{arg}'")?;
            } else {
                write!(f, " {arg}")?;
            }
        }

        Ok(())
    }
}

/// Captured result of a command run with stdout piped.
#[derive(Clone, Debug)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
}

/// Capability for running external commands.
#[cfg_attr(test, automock)]
pub trait CommandRunner {
    /// Runs the command with stdio inherited from the current process.
    ///
    /// # Errors
    /// * If the command cannot be spawned at all.
    ///
    /// # Returns
    /// * `true` if the command exited successfully, `false` otherwise.
    fn status(&self, cmd: &CommandLine) -> io::Result<bool>;

    /// Runs the command with stdout captured and stderr inherited.
    ///
    /// # Errors
    /// * If the command cannot be spawned at all.
    fn output(&self, cmd: &CommandLine) -> io::Result<CommandOutput>;
}

/// The real [`CommandRunner`] backed by `std::process::Command`.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn status(&self, cmd: &CommandLine) -> io::Result<bool> {
        let status = Command::new(&cmd.program).args(&cmd.args).status()?;

        Ok(status.success())
    }

    fn output(&self, cmd: &CommandLine) -> io::Result<CommandOutput> {
        let output = Command::new(&cmd.program)
            .args(&cmd.args)
            .stderr(Stdio::inherit())
            .output()?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
