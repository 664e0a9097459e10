//! Stage reporting
//!
//! All stage announcements go through the [`StageReporter`] trait:
//! - [`SilentReporter`] prints nothing, so only tool output is visible (default)
//! - [`ConsoleReporter`] writes styled stage headers to stderr (`--announce`)

use console::{Term, style};

use crate::error::BootstrapError;
use crate::pipeline::{PipelineReport, Stage};

/// Receives pipeline progress events
pub trait StageReporter {
    /// A stage is about to run; `index` is 1-based
    fn stage_started(&mut self, index: usize, total: usize, stage: &Stage);

    /// Every command of the stage succeeded
    fn stage_finished(&mut self, stage: &Stage);

    /// The stage failed and the pipeline is aborting
    fn stage_failed(&mut self, stage: &Stage, error: &BootstrapError);

    /// All stages succeeded
    fn pipeline_finished(&mut self, report: &PipelineReport);
}

/// Reporter that prints nothing
#[derive(Debug, Default)]
pub struct SilentReporter;

impl StageReporter for SilentReporter {
    fn stage_started(&mut self, _index: usize, _total: usize, _stage: &Stage) {}

    fn stage_finished(&mut self, _stage: &Stage) {}

    fn stage_failed(&mut self, _stage: &Stage, _error: &BootstrapError) {}

    fn pipeline_finished(&mut self, _report: &PipelineReport) {}
}

/// Reporter that announces stages on stderr
pub struct ConsoleReporter {
    term: Term,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    /// Header line shown before a stage starts
    pub fn stage_header(index: usize, total: usize, stage: &Stage) -> String {
        format!(
            "{} {} {}",
            style("==>").for_stderr().green().bold(),
            style(format!("[{index}/{total}]")).for_stderr().dim(),
            style(&stage.name).for_stderr().bold()
        )
    }

    fn line(&self, text: &str) {
        // Losing an announcement must not abort the deployment
        let _ = self.term.write_line(text);
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StageReporter for ConsoleReporter {
    fn stage_started(&mut self, index: usize, total: usize, stage: &Stage) {
        self.line(&Self::stage_header(index, total, stage));
    }

    fn stage_finished(&mut self, _stage: &Stage) {}

    fn stage_failed(&mut self, stage: &Stage, error: &BootstrapError) {
        self.line(&format!(
            "{} {} (exit {})",
            style("==> failed:").for_stderr().red().bold(),
            stage.name,
            error.exit_code()
        ));
    }

    fn pipeline_finished(&mut self, report: &PipelineReport) {
        self.line(&format!(
            "{} {} stage(s), {} command(s)",
            style("==> done:").for_stderr().green().bold(),
            report.stages.len(),
            report.commands
        ));
    }
}

/// Reporter that records events, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<String>,
}

#[cfg(test)]
impl StageReporter for RecordingReporter {
    fn stage_started(&mut self, index: usize, total: usize, stage: &Stage) {
        self.events.push(format!("start {index}/{total} {}", stage.name));
    }

    fn stage_finished(&mut self, stage: &Stage) {
        self.events.push(format!("finish {}", stage.name));
    }

    fn stage_failed(&mut self, stage: &Stage, error: &BootstrapError) {
        self.events
            .push(format!("fail {} {}", stage.name, error.exit_code()));
    }

    fn pipeline_finished(&mut self, report: &PipelineReport) {
        self.events.push(format!("done {}", report.stages.len()));
    }
}
