mod commands;
mod config;
mod forge;
mod git;
mod print;
mod snapshot;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Command;

#[derive(Parser)]
#[command(name = "solsize")]
#[command(about = "Contract size reporting for Foundry projects")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    cli.command.run().await
}
