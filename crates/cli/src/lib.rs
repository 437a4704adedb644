mod cli_args;
mod state;

pub use cli_args::{CliArgs, CliCommand};
pub use state::State;

use clap::Parser;
use hooksmith_diagnostics::enable_tracing_by_env;

/// Parse the command line and run the selected command to completion.
pub fn run() -> miette::Result<()> {
    enable_tracing_by_env();
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("build the tokio runtime")
        .block_on(CliArgs::parse().run())
}
