//! Deployment bootstrap pipeline
//!
//! This module handles:
//! - Building the ordered stages (Dependencies → System packages → Static assets → Migrations)
//! - Fail-fast execution: the first non-zero exit aborts everything after it
//! - Plans for dry runs and the `plan` command
//!
//! Stages and the commands inside them run strictly in order, one at a time.
//! Nothing is rolled back when a step fails.

pub mod command;
pub mod runner;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::config::BootstrapConfig;
use crate::error::{Result, pipeline as pipeline_error};
use crate::manifest::Manifest;
use crate::ui::StageReporter;

pub use command::CommandSpec;
pub use runner::{CommandRunner, StepStatus, SystemRunner};

/// Kind of a pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageKind {
    Dependencies,
    SystemPackages,
    StaticAssets,
    Migrations,
    Extra,
}

impl StageKind {
    /// Built-in stages in execution order
    pub const BUILTIN: [StageKind; 4] = [
        StageKind::Dependencies,
        StageKind::SystemPackages,
        StageKind::StaticAssets,
        StageKind::Migrations,
    ];

    /// Stage name of a built-in kind
    pub fn builtin_name(self) -> Option<&'static str> {
        match self {
            StageKind::Dependencies => Some("dependencies"),
            StageKind::SystemPackages => Some("system-packages"),
            StageKind::StaticAssets => Some("static-assets"),
            StageKind::Migrations => Some("migrations"),
            StageKind::Extra => None,
        }
    }

    /// Look up a built-in kind by its stage name
    pub fn builtin_by_name(name: &str) -> Option<StageKind> {
        Self::BUILTIN
            .into_iter()
            .find(|kind| kind.builtin_name() == Some(name))
    }
}

/// A named group of commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub name: String,
    pub kind: StageKind,
    pub commands: Vec<CommandSpec>,
}

impl Stage {
    fn builtin(kind: StageKind, commands: Vec<CommandSpec>) -> Self {
        Self {
            name: kind.builtin_name().unwrap_or("extra").to_string(),
            kind,
            commands,
        }
    }
}

/// One line of a pipeline plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCommand {
    pub stage: String,
    pub command: String,
    pub argv: Vec<String>,
}

/// Stages and commands that completed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub stages: Vec<String>,
    pub commands: usize,
}

/// The bootstrap pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    workdir: PathBuf,
    manifest: PathBuf,
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Build the pipeline described by `config`, running in `workdir`
    pub fn from_config(config: &BootstrapConfig, workdir: &Path) -> Result<Self> {
        config.validate()?;

        let manifest_arg = config.manifest.display().to_string();
        let manage_arg = config.manage.display().to_string();
        let mut stages = Vec::with_capacity(4 + config.extra_stages.len());

        stages.push(Stage::builtin(
            StageKind::Dependencies,
            prefixed(&config.pip, ["install", "-r", manifest_arg.as_str()]),
        ));

        if config.system_packages.is_empty() {
            debug!("no system packages configured, skipping stage");
        } else {
            let mut install = vec!["install".to_string(), "-y".to_string()];
            install.extend(config.system_packages.iter().cloned());
            let mut commands = prefixed(&config.apt_get, ["update"]);
            commands.extend(prefixed(&config.apt_get, install));
            stages.push(Stage::builtin(StageKind::SystemPackages, commands));
        }

        stages.push(Stage::builtin(
            StageKind::StaticAssets,
            prefixed(
                &config.python,
                [manage_arg.as_str(), "collectstatic", "--no-input"],
            ),
        ));
        stages.push(Stage::builtin(
            StageKind::Migrations,
            prefixed(&config.python, [manage_arg.as_str(), "migrate"]),
        ));

        for extra in &config.extra_stages {
            stages.push(Stage {
                name: extra.name.trim().to_string(),
                kind: StageKind::Extra,
                commands: extra
                    .commands
                    .iter()
                    .filter_map(|prefix| CommandSpec::from_prefix(prefix, Vec::<String>::new()))
                    .collect(),
            });
        }

        Ok(Self {
            workdir: workdir.to_path_buf(),
            manifest: workdir.join(&config.manifest),
            stages,
        })
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Absolute location of the dependency manifest
    pub fn manifest_path(&self) -> &Path {
        &self.manifest
    }

    /// Remove the named stages
    ///
    /// Built-in names are always accepted, even when the stage is already absent
    /// (an empty package list drops `system-packages`).
    pub fn skip(&mut self, names: &[String]) -> Result<()> {
        for name in names {
            let known = StageKind::builtin_by_name(name).is_some()
                || self.stages.iter().any(|s| &s.name == name);
            if !known {
                return Err(pipeline_error::unknown_stage(name));
            }
        }
        self.stages.retain(|stage| {
            let skipped = names.contains(&stage.name);
            if skipped {
                info!(stage = %stage.name, "skipping stage");
            }
            !skipped
        });
        Ok(())
    }

    /// Commands in execution order, without running anything
    pub fn plan(&self) -> Vec<PlannedCommand> {
        self.stages
            .iter()
            .flat_map(|stage| {
                stage.commands.iter().map(|cmd| PlannedCommand {
                    stage: stage.name.clone(),
                    command: cmd.to_string(),
                    argv: cmd.argv(),
                })
            })
            .collect()
    }

    /// Run every stage, stopping at the first failure
    pub fn run(
        &self,
        runner: &mut dyn CommandRunner,
        reporter: &mut dyn StageReporter,
    ) -> Result<PipelineReport> {
        let total = self.stages.len();
        let mut report = PipelineReport::default();

        for (index, stage) in self.stages.iter().enumerate() {
            reporter.stage_started(index + 1, total, stage);
            info!(stage = %stage.name, "stage started");

            match self.run_stage(stage, runner) {
                Ok(commands) => {
                    report.commands += commands;
                    report.stages.push(stage.name.clone());
                    reporter.stage_finished(stage);
                    info!(stage = %stage.name, "stage finished");
                }
                Err(err) => {
                    info!(stage = %stage.name, exit_code = err.exit_code(), "stage failed");
                    reporter.stage_failed(stage, &err);
                    return Err(err);
                }
            }
        }

        reporter.pipeline_finished(&report);
        Ok(report)
    }

    fn run_stage(&self, stage: &Stage, runner: &mut dyn CommandRunner) -> Result<usize> {
        if stage.kind == StageKind::Dependencies {
            let manifest = Manifest::load(&self.manifest)?;
            debug!(
                manifest = %self.manifest.display(),
                packages = ?manifest.package_names(),
                options = manifest.options.len(),
                "manifest loaded"
            );
            for requirement in &manifest.requirements {
                trace!(
                    spec = %requirement.spec,
                    source = %requirement.source.display(),
                    line = requirement.line,
                    "requirement"
                );
            }
        }

        for command in &stage.commands {
            if let StepStatus::Failed { code } = runner.run(&stage.name, command, &self.workdir)? {
                return Err(pipeline_error::step_failed(
                    &stage.name,
                    command.to_string(),
                    code,
                ));
            }
        }
        Ok(stage.commands.len())
    }
}

fn prefixed<I, S>(prefix: &crate::config::CommandPrefix, extra: I) -> Vec<CommandSpec>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CommandSpec::from_prefix(prefix, extra).into_iter().collect()
}
