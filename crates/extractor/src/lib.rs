//! Statement-oriented scanning of fetched source text for static imports.
//!
//! This is deliberately heuristic: raw text is matched against a handful of
//! regexes, with no parser or type analysis behind them. An import-shaped
//! line inside a comment may produce a false positive; that is an accepted
//! limitation of this layer, not a defect.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Imports recovered from one file's source text.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExtractedImports {
    /// Other hooks, by name (`useFoo`).
    pub hooks: BTreeSet<String>,
    /// Symbols imported from the shared utility module.
    pub utils: BTreeSet<String>,
    /// Local helper files, by final path segment without extension.
    pub helpers: BTreeSet<String>,
}

impl ExtractedImports {
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty() && self.utils.is_empty() && self.helpers.is_empty()
    }
}

/// Named imports whose module path contains a `use`-prefixed segment.
static HOOK_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"import\s+(?:type\s+)?\{([^}]+)\}\s*from\s*['"][^'"]*/use[A-Z][A-Za-z0-9]*['"]"#)
        .expect("hook import pattern compiles")
});

/// Named imports whose module path's final segment is `utils`.
static UTILS_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"import\s+(?:type\s+)?\{([^}]+)\}\s*from\s*['"](?:[^'"]*/)?utils['"]"#)
        .expect("utils import pattern compiles")
});

/// Relative `import`/`export ... from` statements under a local `helpers/` subpath.
static HELPER_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:import|export)\s[^;]*?from\s*['"]\.{1,2}/(?:[^'"]*/)?helpers/([^'"]+)['"]"#)
        .expect("helper import pattern compiles")
});

/// Whether a symbol follows the lowercase-prefixed hook naming convention.
static HOOK_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^use[A-Z0-9][A-Za-z0-9]*$").expect("hook name pattern compiles"));

pub fn is_hook_name(symbol: &str) -> bool {
    HOOK_NAME.is_match(symbol)
}

/// Split a braced import list into bare symbols.
///
/// Tolerates multi-line lists, `type` modifiers and `as` renames; the
/// original exported name is what the registry keys on.
fn split_symbols(list: &str) -> impl Iterator<Item = &str> {
    list.split(',')
        .map(str::trim)
        .map(|symbol| symbol.strip_prefix("type ").map_or(symbol, str::trim))
        .map(|symbol| symbol.split_whitespace().next().unwrap_or(symbol))
        .filter(|symbol| !symbol.is_empty())
}

/// Statically scan `source` for hook, shared-utility and local helper imports.
pub fn extract_imports(source: &str) -> ExtractedImports {
    let hooks = HOOK_IMPORT
        .captures_iter(source)
        .flat_map(|captures| {
            let list = captures.get(1).map_or("", |symbols| symbols.as_str());
            split_symbols(list).map(str::to_string).collect::<Vec<_>>()
        })
        .filter(|symbol| is_hook_name(symbol))
        .collect();

    let utils = UTILS_IMPORT
        .captures_iter(source)
        .flat_map(|captures| {
            let list = captures.get(1).map_or("", |symbols| symbols.as_str());
            split_symbols(list).map(str::to_string).collect::<Vec<_>>()
        })
        .collect();

    let helpers = HELPER_IMPORT
        .captures_iter(source)
        .filter_map(|captures| captures.get(1))
        .map(|segment| {
            let segment = segment.as_str();
            // Capture only the final path segment, extension stripped.
            let segment = segment.rsplit('/').next().unwrap_or(segment);
            segment.split('.').next().unwrap_or(segment).to_string()
        })
        .filter(|segment| !segment.is_empty())
        .collect();

    ExtractedImports { hooks, utils, helpers }
}
