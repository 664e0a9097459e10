//! Test fixtures and utilities for reducing test setup duplication.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{ScriptedRunner, create_project};
//!
//! #[test]
//! fn my_test() {
//!     // Project directory with requirements.txt and manage.py
//!     let temp = create_project();
//!
//!     // Runner that fails the migration with exit code 3
//!     let mut runner = ScriptedRunner::default().fail_on("migrate", 3);
//! }
//! ```

#![allow(clippy::expect_used)]

use std::path::Path;

use tempfile::TempDir;

use crate::error::Result;
use crate::pipeline::{CommandRunner, CommandSpec, StepStatus};

/// Create a temp directory laid out like a deployable project.
///
/// # Panics
///
/// Panics if the directory or its files cannot be created.
#[must_use]
pub fn create_project() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    std::fs::write(
        temp.path().join("requirements.txt"),
        "Django==5.0.6\npytesseract==0.3.10\n",
    )
    .expect("Failed to write requirements.txt");
    std::fs::write(temp.path().join("manage.py"), "#!/usr/bin/env python\n")
        .expect("Failed to write manage.py");
    temp
}

/// Command runner that records invocations and answers from a script.
///
/// A command fails when any of its words equals a configured trigger word;
/// every other command succeeds.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    failures: Vec<(String, i32)>,
    pub calls: Vec<String>,
}

impl ScriptedRunner {
    /// Fail commands containing `word` with exit `code`
    #[must_use]
    pub fn fail_on(mut self, word: &str, code: i32) -> Self {
        self.failures.push((word.to_string(), code));
        self
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&mut self, _stage: &str, command: &CommandSpec, _workdir: &Path) -> Result<StepStatus> {
        self.calls.push(command.to_string());
        let argv = command.argv();
        for (word, code) in &self.failures {
            if argv.iter().any(|arg| arg == word) {
                return Ok(StepStatus::Failed { code: *code });
            }
        }
        Ok(StepStatus::Success)
    }
}
