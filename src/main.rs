// Entrypoint for the pack registration CLI.
// - Keeps `main` small: parse configuration, set up logging, hand off to
//   `cli::run`.
// - Errors propagate as `anyhow::Error` and exit with status 1; an empty
//   pack exits with status 2.

use clap::Parser;
use std::process::ExitCode;
use ubl_register::cli::{init_tracing, run, Cli};

fn main() -> anyhow::Result<ExitCode> {
    // `UBL_URL`, `UBL_API_KEY` and `UBL_TIMEOUT` are read here as fallbacks
    // for the matching flags.
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli)
}
