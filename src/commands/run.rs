//! Run command implementation
//!
//! The bootstrap process:
//! 1. Resolve working directory and layered configuration
//! 2. Build the pipeline and drop skipped stages
//! 3. Optionally run preflight checks
//! 4. Run every stage, aborting on the first failing command

use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::RunArgs;
use crate::commands::helpers::load_context;
use crate::commands::plan::print_plan;
use crate::error::Result;
use crate::pipeline::SystemRunner;
use crate::preflight::{self, PreflightEnv};
use crate::ui::{ConsoleReporter, SilentReporter, StageReporter};

/// Run the bootstrap pipeline
pub fn run(workdir: Option<PathBuf>, config_path: Option<&Path>, args: RunArgs) -> Result<()> {
    let ctx = load_context(workdir, config_path, &args.skip)?;

    if args.dry_run {
        return print_plan(&ctx.pipeline, false);
    }

    if args.preflight || ctx.config.preflight {
        preflight::check(&ctx.config, &ctx.pipeline, &PreflightEnv::from_process())?;
    }

    let mut reporter: Box<dyn StageReporter> = if args.announce {
        Box::new(ConsoleReporter::new())
    } else {
        Box::new(SilentReporter)
    };

    let report = ctx.pipeline.run(&mut SystemRunner, reporter.as_mut())?;
    info!(
        workdir = %ctx.workdir.display(),
        stages = report.stages.len(),
        commands = report.commands,
        "bootstrap complete"
    );

    Ok(())
}
