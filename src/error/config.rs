//! Configuration errors

use std::path::Path;

use super::BootstrapError;

/// Creates a config not found error
pub fn not_found(path: &Path) -> BootstrapError {
    BootstrapError::ConfigNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a config parse error
pub fn parse_failed(path: &Path, reason: impl Into<String>) -> BootstrapError {
    BootstrapError::ConfigParseFailed {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> BootstrapError {
    BootstrapError::ConfigInvalid {
        message: message.into(),
    }
}
