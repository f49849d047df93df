// Command-line front end: argument/env configuration via clap, tracing
// setup, and the top-level run that maps outcomes to exit codes.

use crate::api::{self, ApiClient};
use crate::error::PackError;
use crate::pack::Pack;
use crate::ui::Reporter;
use crate::upload::upload_pack;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Exit status for a pack with neither chips nor programs.
pub const EXIT_EMPTY_PACK: u8 = 2;

/// Register a chip/program pack JSON into a running ubl_core instance
#[derive(Parser, Debug)]
#[command(name = "ubl-register", version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON pack containing chips/programs
    pub pack: PathBuf,

    /// Base URL of the ubl_core instance
    #[arg(long, env = "UBL_URL", default_value = api::DEFAULT_BASE_URL)]
    pub url: String,

    /// API key, sent as the x-ubl-key header
    #[arg(long, env = "UBL_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "UBL_TIMEOUT", default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn client_config(&self) -> api::Config {
        api::Config {
            base_url: self.url.clone(),
            api_key: self.api_key.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

/// Install the stderr tracing subscriber. `RUST_LOG` directives apply on
/// top of the WARN default; `--verbose` raises it to DEBUG.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// Load the pack and register every record, printing progress to stdout.
pub fn run(cli: &Cli) -> Result<ExitCode> {
    let pack = Pack::load(&cli.pack)?;
    debug!(chips = pack.chips.len(), programs = pack.programs.len(), path = %cli.pack.display(), "loaded pack");
    if pack.is_empty() {
        eprintln!("{}", PackError::Empty);
        return Ok(ExitCode::from(EXIT_EMPTY_PACK));
    }

    let api = ApiClient::new(&cli.client_config())?;
    debug!(url = %api.register_url(), "registering pack");

    let mut reporter = Reporter::new(std::io::stdout().lock(), pack.len() as u64);
    upload_pack(&api, &pack, &mut reporter)?;
    Ok(ExitCode::SUCCESS)
}
