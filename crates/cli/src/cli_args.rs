pub mod add;
pub mod init;
pub mod registry;

use add::AddArgs;
use clap::{Parser, Subcommand};
use init::InitArgs;
use registry::RegistryCommand;

/// Installer for front-end hooks and their shared utilities.
#[derive(Debug, Parser)]
#[clap(name = "hooksmith")]
#[clap(bin_name = "hooksmith")]
#[clap(version)]
#[clap(about = "Installer for front-end hooks and their shared utilities")]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Create a default hooksmith.json in the project
    Init(InitArgs),
    /// Install hooks together with everything they depend on
    Add(AddArgs),
    /// Manage the registry snapshot
    #[clap(subcommand)]
    Registry(RegistryCommand),
}

impl CliArgs {
    /// Execute the command
    pub async fn run(self) -> miette::Result<()> {
        match self.command {
            CliCommand::Init(args) => args.run(),
            CliCommand::Add(args) => args.run().await,
            CliCommand::Registry(command) => command.run().await,
        }
    }
}
