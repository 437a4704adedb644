use std::path::PathBuf;

pub fn bool_true() -> bool {
    true
}

pub fn default_hooks_path() -> PathBuf {
    PathBuf::from("src/hooks")
}

pub fn default_utils_path() -> PathBuf {
    PathBuf::from("src/utils")
}

pub fn default_registry() -> String {
    "https://raw.githubusercontent.com/hooksmith/hooks/main/src".to_string()
}
