use anyhow::Result;
use clap::Parser;
use logscan_cli::args::{Cli, Command};
use logscan_cli::{commands, init_tracing};
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(target: "logscan", error = %format!("{err:#}"), "logscan failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Harvest(args) => {
            commands::harvest::execute(args, cli.config.as_deref()).await?;
        }
        Command::Decode(args) => {
            commands::decode::execute(args)?;
        }
    }
    Ok(())
}
