use dashmap::DashMap;
use derive_more::{Display, Error};
use hooksmith_fs::{write_file, WriteFileError};
use miette::Diagnostic;
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::sync::Mutex;

/// One async mutex per barrel file path.
///
/// The read-modify-write of a barrel file is the only operation in a batch
/// that touches shared file state, so it is serialized per target path.
pub type BarrelLocks = DashMap<PathBuf, Arc<Mutex<()>>>;

/// Error type of [`ensure_exported`].
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum EnsureExportedError {
    #[display("Failed to read the barrel file at {file_path:?}: {error}")]
    #[diagnostic(code(hooksmith_installer::read_barrel))]
    ReadBarrel {
        file_path: PathBuf,
        #[error(source)]
        error: io::Error,
    },

    #[display("Failed to write the barrel file")]
    #[diagnostic(transparent)]
    WriteBarrel(#[error(source)] WriteFileError),
}

/// Append a re-export line for `symbol` to the barrel file of `utils_dir`,
/// unless one is already present.
///
/// Idempotent: re-adding an exported symbol leaves the file unchanged.
/// Returns whether a line was appended.
pub async fn ensure_exported(
    utils_dir: &Path,
    symbol: &str,
    ext: &str,
    locks: &BarrelLocks,
) -> Result<bool, EnsureExportedError> {
    let file_path = utils_dir.join(format!("index.{ext}"));

    let mutex = Arc::clone(&locks.entry(file_path.clone()).or_default());
    let _guard = mutex.lock().await;

    let existing = match fs::read_to_string(&file_path) {
        Ok(content) => content,
        Err(error) if error.kind() == io::ErrorKind::NotFound => String::new(),
        Err(error) => {
            return Err(EnsureExportedError::ReadBarrel { file_path, error });
        }
    };

    // Any existing export referencing the module counts, whatever its shape.
    if existing.contains(&format!("'./{symbol}'")) {
        tracing::debug!(target: "hooksmith::install", symbol, "Barrel export already present");
        return Ok(false);
    }

    let mut content = existing;
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(&format!("export * from './{symbol}';\n"));

    write_file(&file_path, content.as_bytes()).map_err(EnsureExportedError::WriteBarrel)?;
    tracing::info!(target: "hooksmith::install", symbol, ?file_path, "Added barrel export");
    Ok(true)
}
