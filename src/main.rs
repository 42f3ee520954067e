//! study-copilot binary
//!
//! Parses arguments, installs logging, and hands off to the CLI dispatcher.

use anyhow::Context;
use clap::Parser;
use study_copilot::cli::{init_logging, run, Cli, EXIT_SUCCESS};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_guard = init_logging(cli.verbose, cli.log_file.as_deref())
        .context("failed to set up logging")?;

    let code = run(cli);

    // process::exit skips destructors; flush the log writer first
    drop(log_guard);
    if code != EXIT_SUCCESS {
        std::process::exit(code);
    }
    Ok(())
}
