use std::path::Path;
use walkdir::WalkDir;

/// List every file under `root` as sorted `/`-separated relative paths.
pub fn get_all_files(root: &Path) -> Vec<String> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.expect("access entry");
        if entry.file_type().is_dir() {
            continue;
        }

        // Joining components by hand keeps Unix and Windows output identical.
        let simple_path = entry
            .path()
            .strip_prefix(root)
            .expect("strip prefix from path")
            .components()
            .map(|component| component.as_os_str().to_str().expect("invalid UTF-8"))
            .collect::<Vec<_>>()
            .join("/");

        if !simple_path.is_empty() {
            files.push(simple_path);
        }
    }
    files.sort();
    files
}
