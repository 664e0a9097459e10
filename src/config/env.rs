//! Environment variable overrides
//!
//! `BOOTSTRAP_*` variables take precedence over `bootstrap.yaml`. Lookups go
//! through a closure so the layering can be exercised without touching the
//! process environment.

use std::path::PathBuf;

use tracing::debug;

use crate::config::{BootstrapConfig, CommandPrefix};

pub const MANIFEST: &str = "BOOTSTRAP_MANIFEST";
pub const PYTHON: &str = "BOOTSTRAP_PYTHON";
pub const PIP: &str = "BOOTSTRAP_PIP";
pub const APT_GET: &str = "BOOTSTRAP_APT_GET";
pub const MANAGE: &str = "BOOTSTRAP_MANAGE";
pub const SYSTEM_PACKAGES: &str = "BOOTSTRAP_SYSTEM_PACKAGES";
pub const REQUIRE_ENV: &str = "BOOTSTRAP_REQUIRE_ENV";

/// Split a list given as whitespace- and/or comma-separated words
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

impl BootstrapConfig {
    /// Apply overrides from the process environment
    pub fn apply_process_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    /// Apply overrides using `lookup` to read variables
    ///
    /// A package list variable that is set but empty clears the list, which
    /// skips the system package stage.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(MANIFEST).filter(|v| !v.is_empty()) {
            debug!(var = MANIFEST, %value, "override");
            self.manifest = PathBuf::from(value);
        }
        if let Some(value) = lookup(MANAGE).filter(|v| !v.is_empty()) {
            debug!(var = MANAGE, %value, "override");
            self.manage = PathBuf::from(value);
        }

        for (var, target) in [
            (PYTHON, &mut self.python),
            (PIP, &mut self.pip),
            (APT_GET, &mut self.apt_get),
        ] {
            if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
                debug!(var, %value, "override");
                *target = CommandPrefix::parse(&value);
            }
        }

        if let Some(value) = lookup(SYSTEM_PACKAGES) {
            debug!(var = SYSTEM_PACKAGES, %value, "override");
            self.system_packages = split_list(&value);
        }
        if let Some(value) = lookup(REQUIRE_ENV) {
            debug!(var = REQUIRE_ENV, %value, "override");
            self.require_env = split_list(&value);
        }
    }
}
