//! Check command implementation

use std::path::{Path, PathBuf};

use crate::cli::CheckArgs;
use crate::commands::helpers::load_context;
use crate::error::Result;
use crate::preflight::{self, PreflightEnv};

/// Run preflight checks and report the result
pub fn run(workdir: Option<PathBuf>, config_path: Option<&Path>, args: CheckArgs) -> Result<()> {
    let ctx = load_context(workdir, config_path, &args.skip)?;
    preflight::check(&ctx.config, &ctx.pipeline, &PreflightEnv::from_process())?;
    println!(
        "All preflight checks passed ({} stage(s))",
        ctx.pipeline.stages().len()
    );
    Ok(())
}
