use derive_more::{Display, Error};
use hooksmith_config::{LoadSettingsError, Settings};
use hooksmith_installer::{BarrelLocks, CancelFlag};
use hooksmith_network::ThrottledClient;
use miette::Diagnostic;
use std::path::{Path, PathBuf};

/// Application state for one `hooksmith add` invocation.
pub struct State {
    /// Consumer project root.
    pub cwd: PathBuf,
    /// Configuration read from `hooksmith.json`.
    pub settings: &'static Settings,
    /// HTTP client to make HTTP requests.
    pub http_client: ThrottledClient,
    /// Per-barrel-path write locks.
    pub barrel_locks: BarrelLocks,
    /// Cooperative cancellation, armed by Ctrl-C.
    pub cancel: CancelFlag,
}

/// Error type of [`State::init`].
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum InitStateError {
    #[display("Working directory {dir:?} does not exist")]
    #[diagnostic(code(hooksmith_cli::missing_cwd))]
    MissingCwd { dir: PathBuf },

    #[diagnostic(transparent)]
    LoadSettings(#[error(source)] LoadSettingsError),
}

impl State {
    /// Initialize the application state.
    pub fn init(cwd: &Path) -> Result<Self, InitStateError> {
        if !cwd.is_dir() {
            return Err(InitStateError::MissingCwd { dir: cwd.to_path_buf() });
        }
        Ok(State {
            cwd: cwd.to_path_buf(),
            settings: Settings::load(cwd).map_err(InitStateError::LoadSettings)?.leak(),
            http_client: ThrottledClient::new_from_cpu_count(),
            barrel_locks: BarrelLocks::default(),
            cancel: CancelFlag::new(),
        })
    }
}
