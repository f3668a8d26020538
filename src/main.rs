use anyhow::{anyhow, Result};
use clap::Parser;
use std::process::ExitCode;
use tandem::cli::Cli;
use tandem::output;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "tandem=debug" } else { "tandem=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {}", e))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --version goes to stdout and succeeds; usage errors fail with 1.
            let _ = e.print();
            return Ok(if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            });
        }
    };

    init_tracing(cli.verbose)?;

    match cli.execute().await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            output::print_error(&e.to_string());
            Ok(ExitCode::FAILURE)
        }
    }
}
