use derive_more::{Display, Error};
use miette::Diagnostic;
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

/// Error type of [`write_file`] and [`stage_file`].
#[derive(Debug, Display, Error, Diagnostic)]
pub enum WriteFileError {
    #[display("Failed to create the parent directory at {parent_dir:?}: {error}")]
    CreateDir {
        parent_dir: PathBuf,
        #[error(source)]
        error: io::Error,
    },
    #[display("Failed to write to file at {file_path:?}: {error}")]
    WriteFile {
        file_path: PathBuf,
        #[error(source)]
        error: io::Error,
    },
    #[display("Failed to persist staged content to {file_path:?}: {error}")]
    Persist {
        file_path: PathBuf,
        #[error(source)]
        error: io::Error,
    },
}

fn create_parent_dir(file_path: &Path) -> Result<&Path, WriteFileError> {
    let parent_dir = file_path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir).map_err(|error| WriteFileError::CreateDir {
        parent_dir: parent_dir.to_path_buf(),
        error,
    })?;
    Ok(parent_dir)
}

/// Write `content` to `file_path` as a whole-file overwrite.
///
/// Ancestor directories will be created if they don't already exist.
pub fn write_file(file_path: &Path, content: &[u8]) -> Result<(), WriteFileError> {
    create_parent_dir(file_path)?;
    fs::write(file_path, content).map_err(|error| WriteFileError::WriteFile {
        file_path: file_path.to_path_buf(),
        error,
    })
}

/// Write `content` next to `file_path` and move it into place by rename.
///
/// The destination either keeps its previous content or receives the complete
/// new content. An abandoned staging file is cleaned up by [`NamedTempFile`]'s
/// drop, so interrupting a write never leaves a truncated destination.
pub fn stage_file(file_path: &Path, content: &[u8]) -> Result<(), WriteFileError> {
    let parent_dir = create_parent_dir(file_path)?;

    let write_error = |error| WriteFileError::WriteFile {
        file_path: file_path.to_path_buf(),
        error,
    };

    let mut staged = NamedTempFile::new_in(parent_dir).map_err(write_error)?;
    staged.write_all(content).map_err(write_error)?;
    staged.persist(file_path).map_err(|error| WriteFileError::Persist {
        file_path: file_path.to_path_buf(),
        error: error.error,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn write_file_creates_ancestors_and_overwrites() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("hooks/useFoo/useFoo.ts");

        write_file(&target, b"first").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "first");

        write_file(&target, b"second").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
    }

    #[test]
    fn stage_file_replaces_content_atomically() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("utils/isClient.ts");

        stage_file(&target, b"export const isClient = true;").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "export const isClient = true;");

        stage_file(&target, b"export const isClient = false;").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "export const isClient = false;");

        // No staging leftovers in the destination directory.
        let entries = fs::read_dir(target.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
