//! Dependency manifest errors

use std::path::Path;

use super::BootstrapError;

pub fn not_found(path: &Path) -> BootstrapError {
    BootstrapError::ManifestNotFound {
        path: path.display().to_string(),
    }
}

pub fn empty(path: &Path) -> BootstrapError {
    BootstrapError::ManifestEmpty {
        path: path.display().to_string(),
    }
}

pub fn include_cycle(path: &Path) -> BootstrapError {
    BootstrapError::ManifestIncludeCycle {
        path: path.display().to_string(),
    }
}
