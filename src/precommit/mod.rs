//! Pre-Commit Checks
//!
//! The repository's pre-commit hook as one ordered pipeline of independently
//! toggleable steps: local build check, remote bootstrap, tree mirror,
//! remote build check, query-cache freshness, and schema snapshot drift.
//! Every step runs through the [`CommandRunner`] capability.

pub mod schema;

use crate::{
    errors::{HookError, Result},
    exec::{CommandLine, CommandRunner},
    utils::print_info,
};

/// The remote build environment: a WSL distribution holding a mirror of the
/// working tree on its own file system, where full builds are much faster
/// than on the Windows mount.
#[derive(Clone, Debug)]
pub struct RemoteBuild {
    /// WSL distribution name.
    pub distro: String,
    /// Absolute path of cargo inside the distribution.
    pub cargo: String,
    /// Absolute path of rustup inside the distribution.
    pub rustup: String,
    /// Working tree as seen from inside the distribution, trailing slash
    /// included so rsync copies contents rather than the directory.
    pub source: String,
    /// Mirror location inside the distribution, no trailing slash.
    pub dest: String,
}

impl Default for RemoteBuild {
    fn default() -> Self {
        Self {
            distro: "ubuntu-m2".to_owned(),
            cargo: "/home/fenhl/.cargo/bin/cargo".to_owned(),
            rustup: "/home/fenhl/.cargo/bin/rustup".to_owned(),
            source: "/mnt/c/Users/fenhl/git/github.com/midoshouse/midos.house/stage/".to_owned(),
            dest: "/home/fenhl/wslgit/github.com/midoshouse/midos.house".to_owned(),
        }
    }
}

impl RemoteBuild {
    /// Wraps a command so it runs inside the distribution.
    fn shell<I, A>(&self, args: I) -> CommandLine
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let mut full = vec!["-d".to_owned(), self.distro.clone()];
        full.extend(args.into_iter().map(Into::into));

        CommandLine {
            program: "wsl".to_owned(),
            args: full,
        }
    }

    /// Runs a cargo subcommand inside the mirrored tree.
    fn in_tree<I, A>(&self, args: I) -> CommandLine
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.shell(
            [
                "env".to_owned(),
                "-C".to_owned(),
                self.dest.clone(),
                self.cargo.clone(),
            ]
            .into_iter()
            .chain(args.into_iter().map(Into::into)),
        )
    }
}

/// Which steps the pipeline runs.
#[derive(Clone, Debug)]
pub struct PreCommitOptions {
    /// Remote environment for the bootstrap/mirror/rebuild group; `None`
    /// keeps everything local.
    pub remote: Option<RemoteBuild>,
    /// Whether to (re-)install remote build prerequisites first.
    pub bootstrap: bool,
    /// Whether to verify the query-preparation cache.
    pub cache_check: bool,
    /// Whether to compare the schema snapshot against production.
    pub schema_check: bool,
}

/// Runs the enabled checks in order, stopping at the first failure.
///
/// # Errors
/// * If any check command fails or reports staleness; staleness errors carry
///   the exact remediation command.
pub fn run_checks(runner: &dyn CommandRunner, options: &PreCommitOptions) -> Result<()> {
    run_checked(runner, &CommandLine::new("cargo", ["check"]))?;

    if let Some(remote) = &options.remote {
        if options.bootstrap {
            run_checked(
                runner,
                &remote.shell([
                    "sudo",
                    "-n",
                    "apt-get",
                    "install",
                    "-y",
                    "pkg-config",
                    "libssl-dev",
                ]),
            )?;
            run_checked(runner, &remote.shell([&*remote.rustup, "update", "stable"]))?;
            run_checked(
                runner,
                &remote.shell([&*remote.cargo, "install", "sqlx-cli"]),
            )?;
        }

        // Mirror the tree to the WSL file system to improve compile times.
        print_info(
            "Mirroring working tree",
            &format!("{} -> {} ({})", remote.source, remote.dest, remote.distro),
        );
        let mirror_dest = format!("{}/", remote.dest);
        run_checked(
            runner,
            &remote.shell([
                "rsync",
                "--mkpath",
                "--delete",
                "-av",
                remote.source.as_str(),
                mirror_dest.as_str(),
                "--exclude",
                "target",
            ]),
        )?;

        run_checked(runner, &remote.in_tree(["check"]))?;
    }

    if options.cache_check {
        let (cmd, fix) = match &options.remote {
            Some(remote) => (
                remote.in_tree(["sqlx", "prepare", "--check"]),
                format!(
                    "update .sqlx (wsl -d {} {} sqlx prepare)",
                    remote.distro, remote.cargo
                ),
            ),
            None => (
                CommandLine::new("cargo", ["sqlx", "prepare", "--check"]),
                "update .sqlx (cargo sqlx prepare)".to_owned(),
            ),
        };

        if !runner.status(&cmd).map_err(HookError::Io)? {
            return Err(HookError::StaleQueryCache { fix }.into());
        }
    }

    if options.schema_check {
        print_info(
            "Comparing schema snapshot",
            "assets/schema.sql vs production pg_dump",
        );
        schema::check_schema(runner)?;
    }

    Ok(())
}

/// Runs a command with inherited stdio and turns a non-zero exit into an
/// error naming the invocation.
fn run_checked(runner: &dyn CommandRunner, cmd: &CommandLine) -> Result<()> {
    if !runner.status(cmd).map_err(HookError::Io)? {
        return Err(HookError::CommandFailed {
            command: cmd.to_string(),
        }
        .into());
    }

    Ok(())
}

/// Runs a command with stdout captured, failing on non-zero exit.
pub(crate) fn capture(runner: &dyn CommandRunner, cmd: &CommandLine) -> Result<String> {
    let output = runner.output(cmd).map_err(HookError::Io)?;

    if !output.success {
        return Err(HookError::CommandFailed {
            command: cmd.to_string(),
        }
        .into());
    }

    Ok(output.stdout)
}
