use clap::{Parser, Subcommand};
use hooksmith_network::ThrottledClient;
use hooksmith_registry::{BuildRegistry, Registry};
use miette::{Context, IntoDiagnostic};
use std::{fs, path::PathBuf};

#[derive(Debug, Subcommand)]
pub enum RegistryCommand {
    /// Rebuild the registry snapshot by crawling the remote repository
    Build(BuildArgs),
}

impl RegistryCommand {
    pub async fn run(self) -> miette::Result<()> {
        match self {
            RegistryCommand::Build(args) => args.run().await,
        }
    }
}

#[derive(Debug, Parser)]
pub struct BuildArgs {
    /// URL of the remote component directory listing.
    #[clap(long)]
    pub listing: String,

    /// Root URL that hook sources are fetched from.
    #[clap(long)]
    pub repo_root: String,

    /// Prior snapshot file; its entries are reused without a fetch.
    #[clap(long)]
    pub snapshot: Option<PathBuf>,

    /// Re-fetch every candidate, ignoring the prior snapshot.
    #[clap(long)]
    pub force: bool,

    /// Where to write the snapshot JSON. Defaults to stdout.
    #[clap(long)]
    pub output: Option<PathBuf>,
}

impl BuildArgs {
    pub async fn run(self) -> miette::Result<()> {
        let BuildArgs { listing, repo_root, snapshot, force, output } = self;

        let prior: Option<Registry> = snapshot
            .map(|path| -> miette::Result<Registry> {
                let text = fs::read_to_string(&path)
                    .into_diagnostic()
                    .wrap_err(format!("read the prior snapshot at {path:?}"))?;
                serde_json::from_str(&text)
                    .into_diagnostic()
                    .wrap_err(format!("parse the prior snapshot at {path:?}"))
            })
            .transpose()?;

        let http_client = ThrottledClient::new_from_cpu_count();
        let registry = BuildRegistry {
            http_client: &http_client,
            listing_url: &listing,
            repo_root: &repo_root,
            prior: prior.as_ref(),
            force,
        }
        .run()
        .await
        .wrap_err("build the registry snapshot")?;

        let json = serde_json::to_string_pretty(&registry)
            .expect("a registry always serializes to JSON");
        match output {
            Some(path) => fs::write(&path, json)
                .into_diagnostic()
                .wrap_err(format!("write the snapshot to {path:?}"))?,
            None => println!("{json}"),
        }
        Ok(())
    }
}
