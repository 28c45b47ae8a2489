//! ORO Shared - Entry Point
//!
//! Binary entry point for the `oro` tool. Lives in the `oro` facade crate so
//! the library and the binary share one name.

use clap::Parser;
use oro::cli::{Cli, run};

/// Parse the command line and run the selected command
fn main() -> anyhow::Result<()> {
    run(Cli::parse())
}
