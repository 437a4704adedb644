use clap::Parser;
use hooksmith_config::{Settings, SETTINGS_FILE_NAME};
use miette::Context;
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct InitArgs {
    /// Set working directory.
    #[clap(long, default_value = ".")]
    pub cwd: PathBuf,
}

impl InitArgs {
    pub fn run(self) -> miette::Result<()> {
        let InitArgs { cwd } = self;
        if !cwd.is_dir() {
            miette::bail!("working directory {cwd:?} does not exist");
        }
        Settings::init(&cwd).wrap_err("initialize the settings file")?;
        println!("Wrote {}", cwd.join(SETTINGS_FILE_NAME).display());
        Ok(())
    }
}
