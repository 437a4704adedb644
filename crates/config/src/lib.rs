mod default_values;

use crate::default_values::{bool_true, default_hooks_path, default_registry, default_utils_path};
use derive_more::{Display, Error};
use hooksmith_fs::{write_file, WriteFileError};
use miette::Diagnostic;
use pipe_trait::Pipe;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Name of the project configuration file.
pub const SETTINGS_FILE_NAME: &str = "hooksmith.json";

/// Project configuration read from `hooksmith.json` in the consumer project.
///
/// Every field has a default, so an empty object is a valid configuration.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Directory that receives installed hooks, one subdirectory per hook.
    #[serde(default = "default_hooks_path")]
    pub hooks_path: PathBuf,

    /// Directory that receives installed shared utilities and their barrel file.
    #[serde(default = "default_utils_path")]
    pub utils_path: PathBuf,

    /// Whether the project consumes TypeScript sources (`ts`) or JavaScript (`js`).
    #[serde(default = "bool_true")]
    pub typescript: bool,

    /// Root URL of the remote repository that hook and utility sources are fetched from.
    #[serde(default = "default_registry")]
    pub registry: String,
}

impl Default for Settings {
    fn default() -> Self {
        serde_json::from_str("{}").expect("every settings field has a default")
    }
}

/// Error type of [`Settings::load`].
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum LoadSettingsError {
    #[display("No hooksmith.json found in {dir:?}. Run `hooksmith init` first")]
    #[diagnostic(code(hooksmith_config::not_found))]
    NotFound { dir: PathBuf },

    #[display("Failed to read {file_path:?}: {error}")]
    #[diagnostic(code(hooksmith_config::read))]
    ReadFile {
        file_path: PathBuf,
        #[error(source)]
        error: io::Error,
    },

    #[display("Failed to parse {file_path:?}: {error}")]
    #[diagnostic(code(hooksmith_config::parse))]
    ParseFile {
        file_path: PathBuf,
        #[error(source)]
        error: serde_json::Error,
    },
}

/// Error type of [`Settings::init`].
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum InitSettingsError {
    #[display("{file_path:?} already exists")]
    #[diagnostic(code(hooksmith_config::already_exists))]
    AlreadyExists { file_path: PathBuf },

    #[display("Failed to write the settings file")]
    #[diagnostic(transparent)]
    Write(#[error(source)] WriteFileError),
}

impl Settings {
    /// Load the settings file from a project directory.
    pub fn load(dir: &Path) -> Result<Self, LoadSettingsError> {
        let file_path = dir.join(SETTINGS_FILE_NAME);
        if !file_path.is_file() {
            return Err(LoadSettingsError::NotFound { dir: dir.to_path_buf() });
        }
        let text = fs::read_to_string(&file_path)
            .map_err(|error| LoadSettingsError::ReadFile { file_path: file_path.clone(), error })?;
        serde_json::from_str(&text)
            .map_err(|error| LoadSettingsError::ParseFile { file_path, error })
    }

    /// Write a default settings file into a project directory.
    ///
    /// Refuses to overwrite an existing file.
    pub fn init(dir: &Path) -> Result<Self, InitSettingsError> {
        let file_path = dir.join(SETTINGS_FILE_NAME);
        if file_path.exists() {
            return Err(InitSettingsError::AlreadyExists { file_path });
        }
        let settings = Settings::default();
        let text = serde_json::to_string_pretty(&settings)
            .expect("settings always serialize to JSON");
        write_file(&file_path, text.as_bytes()).map_err(InitSettingsError::Write)?;
        Ok(settings)
    }

    /// File extension of installed sources.
    pub fn ext(&self) -> &'static str {
        if self.typescript {
            "ts"
        } else {
            "js"
        }
    }

    /// URL of the registry snapshot document.
    pub fn snapshot_url(&self) -> String {
        format!("{}/registry.json", self.registry)
    }

    /// URL of a hook's source file: `{repoRoot}/hooks/{name}/{name}.{ext}`.
    pub fn hook_source_url(&self, name: &str) -> String {
        format!("{root}/hooks/{name}/{name}.{ext}", root = self.registry, ext = self.ext())
    }

    /// URL of a local helper file nested under its owning hook.
    pub fn helper_source_url(&self, hook: &str, helper: &str) -> String {
        format!(
            "{root}/hooks/{hook}/helpers/{helper}.{ext}",
            root = self.registry,
            ext = self.ext(),
        )
    }

    /// URL of a shared utility's source file.
    pub fn util_source_url(&self, symbol: &str) -> String {
        format!("{root}/utils/{symbol}.{ext}", root = self.registry, ext = self.ext())
    }

    /// Leak the settings to get a `'static` reference, mirroring how the
    /// resolved configuration is shared across subroutines for a whole run.
    pub fn leak(self) -> &'static Settings {
        self.pipe(Box::new).pipe(Box::leak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn empty_object_uses_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.hooks_path, PathBuf::from("src/hooks"));
        assert_eq!(settings.utils_path, PathBuf::from("src/utils"));
        assert!(settings.typescript);
        assert_eq!(settings.ext(), "ts");
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let settings: Settings = serde_json::from_str(
            r#"{"hooksPath": "app/hooks", "typescript": false, "registry": "http://localhost:8080"}"#,
        )
        .unwrap();
        assert_eq!(settings.hooks_path, PathBuf::from("app/hooks"));
        assert_eq!(settings.ext(), "js");
        assert_eq!(
            settings.hook_source_url("useFoo"),
            "http://localhost:8080/hooks/useFoo/useFoo.js",
        );
        assert_eq!(
            settings.helper_source_url("useFoo", "getHash"),
            "http://localhost:8080/hooks/useFoo/helpers/getHash.js",
        );
        assert_eq!(settings.util_source_url("isClient"), "http://localhost:8080/utils/isClient.js");
    }

    #[test]
    fn init_refuses_to_clobber() {
        let dir = tempdir().unwrap();
        Settings::init(dir.path()).unwrap();
        assert!(dir.path().join(SETTINGS_FILE_NAME).is_file());

        let error = Settings::init(dir.path()).unwrap_err();
        assert!(matches!(error, InitSettingsError::AlreadyExists { .. }));
    }

    #[test]
    fn init_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let written = Settings::init(dir.path()).unwrap();
        let loaded = Settings::load(dir.path()).unwrap();
        assert_eq!(written, loaded);
    }

    #[test]
    fn load_without_file_reports_not_found() {
        let dir = tempdir().unwrap();
        let error = Settings::load(dir.path()).unwrap_err();
        assert!(matches!(error, LoadSettingsError::NotFound { .. }));
    }
}
