//! Error types and handling for deploy-bootstrap
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`pipeline`]: Step execution errors
//! - [`manifest`]: Dependency manifest errors
//! - [`config`]: Configuration errors
//!
//! Every error maps onto a process exit code through [`BootstrapError::exit_code`],
//! following the conventions of `sh -e` for failed or unstartable commands.

pub mod config;
pub mod manifest;
pub mod pipeline;

use miette::Diagnostic;
use thiserror::Error;

/// Exit code used by shells when a command cannot be found
pub const EXIT_NOT_FOUND: i32 = 127;

/// Exit code used by shells when a command exists but cannot be executed
pub const EXIT_NOT_EXECUTABLE: i32 = 126;

/// Exit code for usage and configuration errors of the tool itself
pub const EXIT_USAGE: i32 = 2;

/// Main error type for bootstrap operations
#[derive(Error, Diagnostic, Debug)]
pub enum BootstrapError {
    // Pipeline errors
    #[error("Stage '{stage}' failed: `{command}` exited with status {code}")]
    #[diagnostic(code(bootstrap::pipeline::step_failed))]
    StepFailed {
        stage: String,
        command: String,
        code: i32,
    },

    #[error("{program}: command not found")]
    #[diagnostic(
        code(bootstrap::pipeline::command_not_found),
        help("Install the program or point the matching BOOTSTRAP_* variable at it")
    )]
    CommandNotFound { stage: String, program: String },

    #[error("{program}: permission denied")]
    #[diagnostic(code(bootstrap::pipeline::command_not_executable))]
    CommandNotExecutable { stage: String, program: String },

    #[error("Failed to start '{program}': {reason}")]
    #[diagnostic(code(bootstrap::pipeline::spawn_failed))]
    SpawnFailed {
        stage: String,
        program: String,
        reason: String,
    },

    #[error("Unknown stage: {name}")]
    #[diagnostic(
        code(bootstrap::pipeline::unknown_stage),
        help("Run 'deploy-bootstrap plan' to list the stages of this pipeline")
    )]
    UnknownStage { name: String },

    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(bootstrap::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },

    // Manifest errors
    #[error("Could not open requirements file: {path}")]
    #[diagnostic(
        code(bootstrap::manifest::not_found),
        help("Create the manifest or set BOOTSTRAP_MANIFEST to its location")
    )]
    ManifestNotFound { path: String },

    #[error("Requirements file lists no packages: {path}")]
    #[diagnostic(code(bootstrap::manifest::empty))]
    ManifestEmpty { path: String },

    #[error("Requirements file includes itself: {path}")]
    #[diagnostic(code(bootstrap::manifest::include_cycle))]
    ManifestIncludeCycle { path: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(bootstrap::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file {path}: {reason}")]
    #[diagnostic(code(bootstrap::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(bootstrap::config::invalid))]
    ConfigInvalid { message: String },

    // Preflight errors
    #[error("Preflight found {} problem(s):\n  - {}", .findings.len(), .findings.join("\n  - "))]
    #[diagnostic(
        code(bootstrap::preflight::failed),
        help("Fix the listed problems or run without --preflight to let each tool report them")
    )]
    PreflightFailed { findings: Vec<String> },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(bootstrap::fs::io_error))]
    IoError { message: String },
}

impl BootstrapError {
    /// Process exit code this error should terminate the bootstrap with
    pub fn exit_code(&self) -> i32 {
        match self {
            BootstrapError::StepFailed { code, .. } => *code,
            BootstrapError::CommandNotFound { .. } => EXIT_NOT_FOUND,
            BootstrapError::CommandNotExecutable { .. } | BootstrapError::SpawnFailed { .. } => {
                EXIT_NOT_EXECUTABLE
            }
            BootstrapError::UnknownStage { .. }
            | BootstrapError::UnknownShell { .. }
            | BootstrapError::ConfigNotFound { .. }
            | BootstrapError::ConfigParseFailed { .. }
            | BootstrapError::ConfigInvalid { .. } => EXIT_USAGE,
            BootstrapError::ManifestNotFound { .. }
            | BootstrapError::ManifestEmpty { .. }
            | BootstrapError::ManifestIncludeCycle { .. }
            | BootstrapError::PreflightFailed { .. }
            | BootstrapError::IoError { .. } => 1,
        }
    }

    /// Whether the failing tool has already reported this error on its own streams
    pub fn is_reported_by_tool(&self) -> bool {
        matches!(self, BootstrapError::StepFailed { .. })
    }
}

impl From<std::io::Error> for BootstrapError {
    fn from(err: std::io::Error) -> Self {
        BootstrapError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for BootstrapError {
    fn from(err: serde_yaml::Error) -> Self {
        BootstrapError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for BootstrapError {
    fn from(err: serde_json::Error) -> Self {
        BootstrapError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, BootstrapError>;
