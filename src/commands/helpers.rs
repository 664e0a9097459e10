//! Command helper utilities

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::BootstrapConfig;
use crate::error::{BootstrapError, Result, config as config_error};
use crate::pipeline::Pipeline;

/// Configuration and pipeline shared by the commands
pub struct Context {
    pub workdir: PathBuf,
    pub config: BootstrapConfig,
    pub pipeline: Pipeline,
}

/// Resolve working directory from optional argument
///
/// If a working directory is provided, use it. Otherwise,
/// resolve to the current directory.
pub fn resolve_workdir(workdir: Option<PathBuf>) -> Result<PathBuf> {
    let path = match workdir {
        Some(path) => path,
        None => std::env::current_dir().map_err(|e| BootstrapError::IoError {
            message: format!("Failed to get current directory: {e}"),
        })?,
    };
    if !path.is_dir() {
        return Err(config_error::invalid(format!(
            "working directory does not exist: {}",
            path.display()
        )));
    }
    Ok(path)
}

/// Load the layered configuration and build the pipeline
pub fn load_context(
    workdir: Option<PathBuf>,
    config_path: Option<&Path>,
    skip: &[String],
) -> Result<Context> {
    let workdir = resolve_workdir(workdir)?;
    let mut config = BootstrapConfig::discover(&workdir, config_path)?;
    config.apply_process_env();
    debug!(workdir = %workdir.display(), ?config, "configuration loaded");

    let mut pipeline = Pipeline::from_config(&config, &workdir)?;
    pipeline.skip(skip)?;

    Ok(Context {
        workdir,
        config,
        pipeline,
    })
}
