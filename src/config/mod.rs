//! Configuration handling for deploy-bootstrap
//!
//! Settings are layered: built-in defaults, then `bootstrap.yaml`, then
//! `BOOTSTRAP_*` environment variables, then command line flags.

pub mod bootstrap;
pub mod command;
pub mod env;

// Re-export commonly used types
pub use bootstrap::{BootstrapConfig, ExtraStage};
pub use command::CommandPrefix;
