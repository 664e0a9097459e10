//! Bootstrap configuration (bootstrap.yaml) data structures
//!
//! Every key is optional; missing keys fall back to the defaults of a
//! Django deployment that needs Tesseract OCR:
//!
//! ```yaml
//! manifest: requirements.txt
//! python: python
//! pip: pip
//! apt_get: apt-get
//! manage: manage.py
//! system_packages: [tesseract-ocr, tesseract-ocr-eng]
//! require_env: [DATABASE_URL]
//! preflight: false
//! extra_stages:
//!   - name: create-superuser
//!     commands:
//!       - [python, manage.py, create_superuser]
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::CommandPrefix;
use crate::error::{Result, config as config_error};
use crate::pipeline::StageKind;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "bootstrap.yaml";

/// OCR engine and its English language data
pub const DEFAULT_SYSTEM_PACKAGES: [&str; 2] = ["tesseract-ocr", "tesseract-ocr-eng"];

/// Bootstrap configuration (bootstrap.yaml)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
    /// Dependency manifest, relative to the working directory
    pub manifest: PathBuf,

    /// Interpreter used to run the management entry point
    pub python: CommandPrefix,

    /// Package installer for the language ecosystem
    pub pip: CommandPrefix,

    /// OS package manager
    pub apt_get: CommandPrefix,

    /// Management entry point, relative to the working directory
    pub manage: PathBuf,

    /// OS packages to install; an empty list skips the stage
    pub system_packages: Vec<String>,

    /// Environment variables checked by preflight
    pub require_env: Vec<String>,

    /// Run preflight checks before the pipeline
    pub preflight: bool,

    /// Stages appended after the migrations
    pub extra_stages: Vec<ExtraStage>,
}

/// A user-declared stage run after the built-in ones
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtraStage {
    pub name: String,
    pub commands: Vec<CommandPrefix>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("requirements.txt"),
            python: CommandPrefix::new(["python"]),
            pip: CommandPrefix::new(["pip"]),
            apt_get: CommandPrefix::new(["apt-get"]),
            manage: PathBuf::from("manage.py"),
            system_packages: DEFAULT_SYSTEM_PACKAGES.iter().map(ToString::to_string).collect(),
            require_env: Vec::new(),
            preflight: false,
            extra_stages: Vec::new(),
        }
    }
}

impl BootstrapConfig {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file is a valid, all-defaults configuration
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(config_error::not_found(path));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| config_error::parse_failed(path, e.to_string()))
    }

    /// Load configuration for a working directory
    ///
    /// An explicit path must exist. Without one, `bootstrap.yaml` in the working
    /// directory is used when present and the defaults otherwise.
    pub fn discover(workdir: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default_path = workdir.join(CONFIG_FILE);
        if default_path.is_file() {
            Self::load(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.manifest.as_os_str().is_empty() {
            return Err(config_error::invalid("manifest path cannot be empty"));
        }
        if self.manage.as_os_str().is_empty() {
            return Err(config_error::invalid("manage path cannot be empty"));
        }

        for (key, prefix) in [
            ("python", &self.python),
            ("pip", &self.pip),
            ("apt_get", &self.apt_get),
        ] {
            if prefix.is_empty() {
                return Err(config_error::invalid(format!("{key} command cannot be empty")));
            }
        }

        for package in &self.system_packages {
            validate_package_name(package)?;
        }

        for name in &self.require_env {
            if name.is_empty() || name.contains('=') {
                return Err(config_error::invalid(format!(
                    "invalid environment variable name '{name}'"
                )));
            }
        }

        self.validate_extra_stages()
    }

    fn validate_extra_stages(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for stage in &self.extra_stages {
            let name = stage.name.trim();
            if name.is_empty() {
                return Err(config_error::invalid("extra stage name cannot be empty"));
            }
            if StageKind::builtin_by_name(name).is_some() {
                return Err(config_error::invalid(format!(
                    "extra stage '{name}' collides with a built-in stage"
                )));
            }
            if !seen.insert(name) {
                return Err(config_error::invalid(format!(
                    "extra stage '{name}' is declared more than once"
                )));
            }
            if stage.commands.is_empty() {
                return Err(config_error::invalid(format!(
                    "extra stage '{name}' has no commands"
                )));
            }
            if stage.commands.iter().any(CommandPrefix::is_empty) {
                return Err(config_error::invalid(format!(
                    "extra stage '{name}' contains an empty command"
                )));
            }
        }
        Ok(())
    }
}

/// Package names are passed straight to the package manager, so they must not
/// be mistaken for options or split into several words.
fn validate_package_name(package: &str) -> Result<()> {
    if package.is_empty() {
        return Err(config_error::invalid("system package name cannot be empty"));
    }
    if package.starts_with('-') {
        return Err(config_error::invalid(format!(
            "system package '{package}' looks like an option"
        )));
    }
    if package.chars().any(char::is_whitespace) {
        return Err(config_error::invalid(format!(
            "system package '{package}' contains whitespace"
        )));
    }
    Ok(())
}
