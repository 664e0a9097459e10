//! Common test utilities for deploy-bootstrap integration tests
//!
//! A [`TestProject`] is a throwaway Django-style project plus a `bin/`
//! directory of fake `pip`, `apt-get` and `python` scripts. The fakes append
//! their arguments to `calls.log` and exit with the status taken from an
//! environment variable, so tests can observe ordering and failures without
//! touching the real tools.

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Environment variables that must not leak from the developer's shell
const BOOTSTRAP_VARS: &[&str] = &[
    "BOOTSTRAP_WORKDIR",
    "BOOTSTRAP_CONFIG",
    "BOOTSTRAP_MANIFEST",
    "BOOTSTRAP_PYTHON",
    "BOOTSTRAP_PIP",
    "BOOTSTRAP_APT_GET",
    "BOOTSTRAP_MANAGE",
    "BOOTSTRAP_SYSTEM_PACKAGES",
    "BOOTSTRAP_REQUIRE_ENV",
    "BOOTSTRAP_LOG",
];

const FAKE_PIP: &str = r#"#!/bin/sh
echo "pip $*" >> "$CALLS_LOG"
echo "Successfully installed from $3"
exit ${PIP_EXIT:-0}
"#;

const FAKE_APT_GET: &str = r#"#!/bin/sh
echo "apt-get $*" >> "$CALLS_LOG"
case "$1" in
  update) exit ${APT_UPDATE_EXIT:-0} ;;
  install) exit ${APT_INSTALL_EXIT:-0} ;;
esac
exit 0
"#;

const FAKE_PYTHON: &str = r#"#!/bin/sh
echo "python $*" >> "$CALLS_LOG"
case "$2" in
  collectstatic) exit ${COLLECTSTATIC_EXIT:-0} ;;
  migrate)
    if [ -n "$MIGRATE_SIGNAL" ]; then kill -"$MIGRATE_SIGNAL" $$; fi
    exit ${MIGRATE_EXIT:-0} ;;
esac
exit 0
"#;

/// A test project for integration tests
#[allow(dead_code)]
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
    /// Directory holding the fake tools
    pub bin: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    /// Create a project with a requirements file, manage.py and fake tools
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        let path = root.join("app");
        let bin = root.join("bin");
        std::fs::create_dir_all(&path).expect("Failed to create project directory");
        std::fs::create_dir_all(&bin).expect("Failed to create bin directory");

        let project = Self { temp, path, bin };
        project.write_file("requirements.txt", "Django==5.0.6\npytesseract\n");
        project.write_file("manage.py", "#!/usr/bin/env python\n");
        project.write_tool("pip", FAKE_PIP);
        project.write_tool("apt-get", FAKE_APT_GET);
        project.write_tool("python", FAKE_PYTHON);
        project
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Remove a file from the project
    pub fn remove_file(&self, path: &str) {
        std::fs::remove_file(self.path.join(path)).expect("Failed to remove file");
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Install an executable script in the fake tool directory
    pub fn write_tool(&self, name: &str, script: &str) {
        let tool = self.bin.join(name);
        std::fs::write(&tool, script).expect("Failed to write tool");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755))
                .expect("Failed to make tool executable");
        }
    }

    fn calls_log(&self) -> PathBuf {
        self.temp.path().join("calls.log")
    }

    /// Commands the fake tools received, in order
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.calls_log())
            .map(|content| content.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Forget previously recorded calls
    pub fn clear_calls(&self) {
        let _ = std::fs::remove_file(self.calls_log());
    }

    /// The binary, running in the project with the fake tools first on PATH
    pub fn cmd(&self) -> Command {
        let mut cmd = bootstrap_cmd();
        let path = match std::env::var_os("PATH") {
            Some(existing) => {
                let mut paths = vec![self.bin.clone()];
                paths.extend(std::env::split_paths(&existing));
                std::env::join_paths(paths).expect("Failed to build PATH")
            }
            None => self.bin.clone().into_os_string(),
        };
        cmd.current_dir(&self.path)
            .env("PATH", path)
            .env("CALLS_LOG", self.calls_log());
        cmd
    }
}

/// The binary with a clean `BOOTSTRAP_*` environment
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn bootstrap_cmd() -> Command {
    let mut cmd = Command::cargo_bin("deploy-bootstrap").unwrap();
    for var in BOOTSTRAP_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Calls made by a complete successful run with default settings
#[allow(dead_code)]
pub fn default_calls() -> Vec<String> {
    [
        "pip install -r requirements.txt",
        "apt-get update",
        "apt-get install -y tesseract-ocr tesseract-ocr-eng",
        "python manage.py collectstatic --no-input",
        "python manage.py migrate",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = TestProject::new();
        assert!(project.file_exists("requirements.txt"));
        assert!(project.file_exists("manage.py"));
        assert!(project.bin.join("pip").exists());
        assert!(project.calls().is_empty());
    }
}
