use crate::State;
use clap::Parser;
use hooksmith_installer::InstallHooks;
use hooksmith_registry::LoadRegistry;
use hooksmith_resolver::resolve;
use miette::Context;
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct AddArgs {
    /// Hooks to install, by name.
    pub names: Vec<String>,

    /// Install every hook in the registry.
    #[clap(long)]
    pub all: bool,

    /// Re-fetch and overwrite files that already exist.
    #[clap(long)]
    pub overwrite: bool,

    /// Set working directory.
    #[clap(long, default_value = ".")]
    pub cwd: PathBuf,
}

impl AddArgs {
    pub async fn run(self) -> miette::Result<()> {
        let AddArgs { names, all, overwrite, cwd } = self;
        let state = State::init(&cwd).wrap_err("initialize the state")?;

        let registry = LoadRegistry {
            http_client: &state.http_client,
            snapshot_url: &state.settings.snapshot_url(),
        }
        .run()
        .await
        .wrap_err("load the registry snapshot")?;

        let requested: Vec<String> = if all {
            registry.names().map(str::to_string).collect()
        } else {
            names
        };
        if requested.is_empty() {
            miette::bail!("nothing to install: pass hook names or --all");
        }

        let resolution = resolve(&requested, &registry);

        // Ctrl-C stops scheduling new units; the in-flight staged write is
        // discarded while completed units stay installed.
        let cancel = state.cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!(target: "hooksmith::install", "Interrupt received");
                cancel.cancel();
            }
        });

        let report = InstallHooks {
            http_client: &state.http_client,
            settings: state.settings,
            cwd: &state.cwd,
            resolution: &resolution,
            overwrite,
            cancel: &state.cancel,
            barrel_locks: &state.barrel_locks,
        }
        .run()
        .await;

        report.print_summary();
        Ok(())
    }
}
