//! Command implementations for deploy-bootstrap CLI

pub mod check;
pub mod completions;
pub mod helpers;
pub mod plan;
pub mod run;
pub mod version;
