//! Preflight checks
//!
//! Validates the environment a pipeline needs without running any of its
//! commands: the manifest, the management entry point, required environment
//! variables and the programs each stage invokes. The pipeline itself does not
//! run these checks unless asked to; by default each tool reports its own
//! problems.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::BootstrapConfig;
use crate::error::{BootstrapError, Result};
use crate::manifest::Manifest;
use crate::pipeline::Pipeline;

/// Inputs of a preflight run that come from the process environment
pub struct PreflightEnv<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Reads an environment variable
    pub lookup: F,
    /// Search path for programs
    pub path: Option<OsString>,
}

impl PreflightEnv<fn(&str) -> Option<String>> {
    /// Preflight inputs taken from the current process
    pub fn from_process() -> Self {
        Self {
            lookup: |key| std::env::var(key).ok(),
            path: std::env::var_os("PATH"),
        }
    }
}

/// Collect every problem found; an empty list means the pipeline can start
pub fn findings<F>(
    config: &BootstrapConfig,
    pipeline: &Pipeline,
    env: &PreflightEnv<F>,
) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut findings = Vec::new();
    let workdir = pipeline.workdir();
    let stage_names: Vec<&str> = pipeline.stages().iter().map(|s| s.name.as_str()).collect();

    if stage_names.contains(&"dependencies") {
        if let Err(err) = Manifest::load(pipeline.manifest_path()) {
            findings.push(err.to_string());
        }
    }

    let uses_manage = pipeline
        .stages()
        .iter()
        .flat_map(|s| &s.commands)
        .any(|cmd| cmd.args.iter().any(|a| Path::new(a) == config.manage));
    if uses_manage && !workdir.join(&config.manage).is_file() {
        findings.push(format!(
            "Management entry point not found: {}",
            workdir.join(&config.manage).display()
        ));
    }

    for name in &config.require_env {
        match (env.lookup)(name) {
            Some(value) if !value.is_empty() => {}
            _ => findings.push(format!("Environment variable {name} is not set")),
        }
    }

    let mut checked: Vec<&str> = Vec::new();
    for stage in pipeline.stages() {
        for command in &stage.commands {
            let program = command.program.as_str();
            if checked.contains(&program) {
                continue;
            }
            checked.push(program);
            if find_program(program, workdir, env.path.as_ref()).is_none() {
                findings.push(format!(
                    "Program '{program}' (stage {}) not found on PATH",
                    stage.name
                ));
            }
        }
    }

    debug!(count = findings.len(), "preflight finished");
    findings
}

/// Run preflight and turn findings into an error
pub fn check<F>(
    config: &BootstrapConfig,
    pipeline: &Pipeline,
    env: &PreflightEnv<F>,
) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let findings = findings(config, pipeline, env);
    if findings.is_empty() {
        Ok(())
    } else {
        Err(BootstrapError::PreflightFailed { findings })
    }
}

/// Resolve `program` the way `execvp` would
///
/// Names containing a path separator are taken relative to `workdir`; bare
/// names are searched in `search_path`, where empty entries stand for `workdir`.
pub fn find_program(
    program: &str,
    workdir: &Path,
    search_path: Option<&OsString>,
) -> Option<PathBuf> {
    if program.contains(std::path::MAIN_SEPARATOR) || program.contains('/') {
        let candidate = workdir.join(program);
        return is_executable(&candidate).then_some(candidate);
    }

    // An empty entry means the directory the program runs in
    let search_path = search_path?;
    std::env::split_paths(search_path)
        .map(|dir| {
            if dir.as_os_str().is_empty() {
                workdir.join(program)
            } else {
                dir.join(program)
            }
        })
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
