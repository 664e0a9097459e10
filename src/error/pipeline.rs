//! Step execution errors

use std::io;

use super::BootstrapError;

/// Creates a step failure carrying the exit code of the failed command
pub fn step_failed(
    stage: impl Into<String>,
    command: impl Into<String>,
    code: i32,
) -> BootstrapError {
    BootstrapError::StepFailed {
        stage: stage.into(),
        command: command.into(),
        code,
    }
}

/// Classifies an error returned while spawning `program`
pub fn spawn_error(
    stage: impl Into<String>,
    program: impl Into<String>,
    err: &io::Error,
) -> BootstrapError {
    let stage = stage.into();
    let program = program.into();
    match err.kind() {
        io::ErrorKind::NotFound => BootstrapError::CommandNotFound { stage, program },
        io::ErrorKind::PermissionDenied => BootstrapError::CommandNotExecutable { stage, program },
        _ => BootstrapError::SpawnFailed {
            stage,
            program,
            reason: err.to_string(),
        },
    }
}

/// Creates an unknown stage error
pub fn unknown_stage(name: impl Into<String>) -> BootstrapError {
    BootstrapError::UnknownStage { name: name.into() }
}
