//! deploy-bootstrap - fail-fast deployment bootstrap
//!
//! Runs the deployment build of a Django-style web application as a strictly
//! sequential pipeline: dependencies, system packages, static assets, migrations.
//! The first failing command aborts the run and its exit code becomes ours.

use clap::Parser;
use miette::Diagnostic;

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod manifest;
mod pipeline;
mod preflight;
#[cfg(test)]
mod test_fixtures;
mod ui;

use cli::{Cli, Commands};
use error::BootstrapError;

/// Print an error the tool itself raised, with its help text when it has one
fn report(err: &BootstrapError) {
    eprintln!("Error: {err}");
    if let Some(help) = err.help() {
        eprintln!("  help: {help}");
    }
}

fn main() {
    let mut cli = Cli::parse();
    logging::init(cli.verbose);

    let workdir = cli.workdir.take();
    let config = cli.config.take();

    let result = match cli.command_or_default() {
        Commands::Run(args) => commands::run::run(workdir, config.as_deref(), args),
        Commands::Plan(args) => commands::plan::run(workdir, config.as_deref(), args),
        Commands::Check(args) => commands::check::run(workdir, config.as_deref(), args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        // The failing tool has already printed its own diagnostics
        if !e.is_reported_by_tool() {
            report(&e);
        }
        std::process::exit(e.exit_code());
    }
}
