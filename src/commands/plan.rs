//! Plan command implementation

use std::path::{Path, PathBuf};

use crate::cli::PlanArgs;
use crate::commands::helpers::load_context;
use crate::error::Result;
use crate::pipeline::Pipeline;

/// Print the commands the pipeline would run
pub fn run(workdir: Option<PathBuf>, config_path: Option<&Path>, args: PlanArgs) -> Result<()> {
    let ctx = load_context(workdir, config_path, &args.skip)?;
    print_plan(&ctx.pipeline, args.json)
}

/// Print `pipeline` as text grouped by stage, or as JSON
pub fn print_plan(pipeline: &Pipeline, json: bool) -> Result<()> {
    println!("{}", render_plan(pipeline, json)?);
    Ok(())
}

fn render_plan(pipeline: &Pipeline, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(&pipeline.plan())?);
    }

    let mut lines = Vec::new();
    for stage in pipeline.stages() {
        lines.push(format!("{}:", stage.name));
        for command in &stage.commands {
            lines.push(format!("  {command}"));
        }
    }
    Ok(lines.join("\n"))
}
