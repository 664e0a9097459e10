//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - run: Run command arguments
//! - plan: Plan command arguments
//! - check: Check command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod check;
pub mod completions;
pub mod plan;
pub mod run;

pub use check::CheckArgs;
pub use completions::CompletionsArgs;
pub use plan::PlanArgs;
pub use run::RunArgs;

/// deploy-bootstrap - fail-fast deployment bootstrap
///
/// Installs dependencies and system packages, collects static assets and
/// migrates the database of a Django-style application.
#[derive(Parser, Debug)]
#[command(
    name = "deploy-bootstrap",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Fail-fast deployment bootstrap for Django-style web applications",
    long_about = "Runs the deployment build of a Django-style application: installs the \
                  packages listed in requirements.txt, installs Tesseract OCR, collects static \
                  assets and applies database migrations. The first failing step aborts the \
                  bootstrap with that step's exit code.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  deploy-bootstrap                         \x1b[90m# Run the whole pipeline\x1b[0m\n   \
                  deploy-bootstrap run --announce          \x1b[90m# Print a header before each stage\x1b[0m\n   \
                  deploy-bootstrap run --skip system-packages\n   \
                  deploy-bootstrap plan --json             \x1b[90m# Show the commands without running them\x1b[0m\n   \
                  deploy-bootstrap check                   \x1b[90m# Validate the environment\x1b[0m\n"
)]
pub struct Cli {
    /// Working directory for every command (defaults to current directory)
    #[arg(long, short = 'C', global = true, env = "BOOTSTRAP_WORKDIR")]
    pub workdir: Option<PathBuf>,

    /// Configuration file (defaults to bootstrap.yaml in the working directory)
    #[arg(long, short = 'c', global = true, env = "BOOTSTRAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Runs the pipeline when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bootstrap pipeline
    Run(RunArgs),

    /// Show the commands the pipeline would run
    Plan(PlanArgs),

    /// Validate the environment without running anything
    Check(CheckArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Cli {
    /// The subcommand to execute, defaulting to a plain run
    pub fn command_or_default(&mut self) -> Commands {
        self.command
            .take()
            .unwrap_or_else(|| Commands::Run(RunArgs::default()))
    }
}
