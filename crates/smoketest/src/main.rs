//! Scripted end-to-end driver for the menuki engine.
//!
//! Replays deterministic host sessions through the real engine against the
//! fake collaborators, verifying every commit. Runs outside the unit-test
//! harness so a packaged build can be exercised directly.

use std::process::ExitCode;

use clap::Parser;
use logging::LogArgs;
use tracing::{error, info};

mod cases;

/// Command-line interface arguments for the smoketest binary.
#[derive(Parser, Debug)]
#[command(name = "smoketest", about = "Menuki smoketest tool", version)]
struct Cli {
    /// Logging controls
    #[command(flatten)]
    log: LogArgs,

    /// Run only the case with this name
    #[arg(long)]
    case: Option<String>,

    /// List available cases and exit
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.log);

    if cli.list {
        for (name, _) in cases::ALL {
            println!("{}", name);
        }
        return ExitCode::SUCCESS;
    }

    let mut ran = 0usize;
    let mut failed = 0usize;
    for (name, run) in cases::ALL {
        if cli.case.as_deref().is_some_and(|want| want != *name) {
            continue;
        }
        ran += 1;
        match run() {
            Ok(()) => info!(case = name, "ok"),
            Err(e) => {
                error!(case = name, error = %e, "failed");
                failed += 1;
            }
        }
    }

    if ran == 0 {
        error!("no case matched");
        return ExitCode::FAILURE;
    }
    info!(ran, failed, "smoketest finished");
    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
