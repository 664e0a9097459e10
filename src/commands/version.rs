//! Version command implementation

use crate::error::Result;

/// Print version and build information
pub fn run() -> Result<()> {
    println!("{}", version_text());
    Ok(())
}

fn version_text() -> String {
    let profile = if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    };
    format!(
        "deploy-bootstrap {}\n\n\
         Build info:\n  \
         Minimum Rust version: {}\n  \
         Profile: {profile}\n  \
         Target: {}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_RUST_VERSION"),
        std::env::consts::ARCH,
        std::env::consts::OS,
    )
}
