//! Command execution
//!
//! The [`CommandRunner`] trait is the seam between the pipeline and the
//! operating system. [`SystemRunner`] spawns real processes that inherit the
//! standard streams, so tool output reaches the caller untouched.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use crate::error::{Result, pipeline as pipeline_error};
use crate::pipeline::CommandSpec;

/// Outcome of a single command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Success,
    Failed { code: i32 },
}

impl StepStatus {
    /// Map a process exit status the way a POSIX shell reports it
    pub fn from_exit_status(status: ExitStatus) -> Self {
        if status.success() {
            return StepStatus::Success;
        }
        let code = status.code().or_else(|| signal_code(status)).unwrap_or(1);
        // A non-success status never maps onto 0
        StepStatus::Failed {
            code: if code == 0 { 1 } else { code },
        }
    }
}

#[cfg(unix)]
fn signal_code(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(|signal| 128 + signal)
}

#[cfg(not(unix))]
fn signal_code(_status: ExitStatus) -> Option<i32> {
    None
}

/// Executes pipeline commands
pub trait CommandRunner {
    /// Run `command` in `workdir` and wait for it to finish
    ///
    /// Returns an error only when the command could not be started; a command
    /// that ran and failed yields [`StepStatus::Failed`].
    fn run(&mut self, stage: &str, command: &CommandSpec, workdir: &Path) -> Result<StepStatus>;
}

/// Runs commands as child processes of the current process
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, stage: &str, command: &CommandSpec, workdir: &Path) -> Result<StepStatus> {
        debug!(stage, command = %command, workdir = %workdir.display(), "spawning");

        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(workdir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| pipeline_error::spawn_error(stage, &command.program, &e))?;

        let step = StepStatus::from_exit_status(status);
        debug!(stage, command = %command, ?step, "finished");
        Ok(step)
    }
}
