//! Execution driver
//!
//! Runs formatted commands one at a time from the source root, stopping at the
//! first non-zero exit.

use std::io::Write;
use std::path::Path;
use std::process::{Command as ProcessCommand, ExitStatus};

use crate::common::paths::resolve_program;
use crate::common::{Error, Result};
use crate::steps::{annotation, command_line, Command};

/// Environment variable set for children in testing mode
pub const TESTING_ENV: &str = "BUILDBOT_TESTING";

/// Which argv form of each command gets executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Shell-wrapped command, inherited environment
    Normal,
    /// Bare testing command with `BUILDBOT_TESTING=1`
    Testing,
}

/// Sequential command runner writing its CI log lines to `out`
pub struct Runner<'a, W: Write> {
    src_root: &'a Path,
    mode: Mode,
    out: W,
}

impl<'a, W: Write> Runner<'a, W> {
    pub fn new(src_root: &'a Path, mode: Mode, out: W) -> Self {
        Self {
            src_root,
            mode,
            out,
        }
    }

    /// Run `commands` in order
    ///
    /// Returns 0 when every command succeeded, otherwise the exit code of the
    /// first command that failed. Later commands are not started.
    pub fn run(&mut self, commands: &[Command]) -> Result<i32> {
        for cmd in commands {
            writeln!(self.out, "Will run: {}", command_line(&cmd.command)?)?;
        }

        for cmd in commands {
            if let Some(step_name) = &cmd.step_name {
                annotation::print_named_step(&mut self.out, step_name)?;
            }
            writeln!(self.out, "{}", command_line(&cmd.command)?)?;
            self.out.flush()?;

            let code = match self.mode {
                Mode::Normal => self.spawn(cmd, &cmd.command, false)?,
                Mode::Testing => match &cmd.testing_command {
                    Some(argv) => self.spawn(cmd, argv, true)?,
                    None => {
                        tracing::debug!(step = ?cmd.step_name, "No testing form, skipping");
                        continue;
                    }
                },
            };

            if code != 0 {
                tracing::info!(step = ?cmd.step_name, code, "Step failed, stopping");
                return Ok(code);
            }
        }

        Ok(0)
    }

    fn spawn(&self, cmd: &Command, argv: &[String], testing: bool) -> Result<i32> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            Error::EmptyCommand(cmd.step_name.clone().unwrap_or_default())
        })?;

        let mut process = ProcessCommand::new(resolve_program(self.src_root, program));
        process.args(args).current_dir(self.src_root);
        if testing {
            process.env(TESTING_ENV, "1");
        }

        tracing::debug!(program = %program, args = args.len(), "Spawning");
        let status = process
            .status()
            .map_err(|e| Error::spawn(program, e))?;
        let code = exit_code(status);
        tracing::debug!(program = %program, code, "Exited");
        Ok(code)
    }
}

/// Exit code to propagate for a finished child
///
/// A child killed by a signal maps to `128 + signal`, as shells report it.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
