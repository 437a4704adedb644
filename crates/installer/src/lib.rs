mod barrel;
mod cancel;
mod install_hooks;

pub use barrel::{ensure_exported, BarrelLocks, EnsureExportedError};
pub use cancel::CancelFlag;
pub use install_hooks::InstallHooks;
