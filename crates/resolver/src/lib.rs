//! Transitive-closure walk over the registry.
//!
//! The whole plan is computed and deduplicated before any fetch begins, so
//! fetch order never affects correctness.

use hooksmith_registry::Registry;
use std::collections::{HashSet, VecDeque};

/// One hook the installer must fetch and write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedHook {
    pub name: String,
    /// Whether the user asked for this hook by name (as opposed to it being
    /// pulled in transitively). Failures of requested hooks are user-visible;
    /// failures of transitive ones degrade to logged skips.
    pub requested: bool,
    /// Local helper files nested under this hook's directory.
    pub helpers: Vec<String>,
}

/// Output of [`resolve`]: every unit to install exactly once.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Hooks in first-visit order.
    pub hooks: Vec<PlannedHook>,
    /// Deduplicated union of shared-utility symbols across all hooks.
    pub utils: Vec<String>,
    /// Directly requested names with no registry entry. Reported per name.
    pub unknown: Vec<String>,
    /// Transitively required names with no registry entry. Logged and skipped.
    pub missing: Vec<String>,
}

/// Walk the dependency graph breadth-first from `requested`.
///
/// A name is expanded at most once, so dependency cycles terminate after
/// every member has been visited.
pub fn resolve(requested: &[String], registry: &Registry) -> Resolution {
    let mut resolution = Resolution::default();
    let mut visited = HashSet::<String>::new();
    let mut seen_utils = HashSet::<String>::new();

    let mut queue: VecDeque<(String, bool)> =
        requested.iter().map(|name| (name.clone(), true)).collect();

    while let Some((name, requested)) = queue.pop_front() {
        if !visited.insert(name.clone()) {
            continue;
        }

        let Some(entry) = registry.get(&name) else {
            if requested {
                tracing::warn!(target: "hooksmith::resolve", name, "Unknown hook requested");
                resolution.unknown.push(name);
            } else {
                tracing::warn!(target: "hooksmith::resolve", name, "Skip missing transitive dependency");
                resolution.missing.push(name);
            }
            continue;
        };

        for dependency in &entry.hook_dependency {
            queue.push_back((dependency.clone(), false));
        }

        // Utility symbols and helper files are leaves: recorded, not expanded.
        for util in &entry.utils_dependency {
            if seen_utils.insert(util.clone()) {
                resolution.utils.push(util.clone());
            }
        }

        resolution.hooks.push(PlannedHook {
            name,
            requested,
            helpers: entry.local_dependency.clone(),
        });
    }

    tracing::debug!(
        target: "hooksmith::resolve",
        hooks = resolution.hooks.len(),
        utils = resolution.utils.len(),
        unknown = resolution.unknown.len(),
        missing = resolution.missing.len(),
        "Resolved install plan",
    );

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use hooksmith_registry::RegistryEntry;
    use pretty_assertions::assert_eq;

    fn entry(name: &str, hooks: &[&str], utils: &[&str]) -> RegistryEntry {
        RegistryEntry {
            name: name.to_string(),
            hook_dependency: hooks.iter().map(|dep| dep.to_string()).collect(),
            utils_dependency: utils.iter().map(|util| util.to_string()).collect(),
            ..Default::default()
        }
    }

    fn names(resolution: &Resolution) -> Vec<&str> {
        resolution.hooks.iter().map(|hook| hook.name.as_str()).collect()
    }

    fn requested(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn expands_transitive_dependencies_once() {
        let registry: Registry = [
            entry("useA", &["useB"], &["x"]),
            entry("useB", &[], &["x"]),
            entry("useC", &["useB"], &[]),
        ]
        .into_iter()
        .collect();

        let resolution = resolve(&requested(&["useA", "useC"]), &registry);
        assert_eq!(names(&resolution), vec!["useA", "useC", "useB"]);
        // Shared utility appears exactly once.
        assert_eq!(resolution.utils, vec!["x"]);
        assert!(resolution.unknown.is_empty());
        assert!(resolution.missing.is_empty());
    }

    #[test]
    fn terminates_on_cycles() {
        let registry: Registry =
            [entry("useA", &["useB"], &[]), entry("useB", &["useA"], &[])].into_iter().collect();

        let resolution = resolve(&requested(&["useA"]), &registry);
        assert_eq!(names(&resolution), vec!["useA", "useB"]);
    }

    #[test]
    fn splits_unknown_requested_names_from_missing_transitive_ones() {
        let registry: Registry = [entry("useA", &["useGone"], &[])].into_iter().collect();

        let resolution = resolve(&requested(&["useA", "useZ"]), &registry);
        assert_eq!(names(&resolution), vec!["useA"]);
        assert_eq!(resolution.unknown, vec!["useZ"]);
        assert_eq!(resolution.missing, vec!["useGone"]);
    }

    #[test]
    fn requested_flag_survives_duplicate_requests() {
        let registry: Registry =
            [entry("useA", &["useB"], &[]), entry("useB", &[], &[])].into_iter().collect();

        // useB is both requested and a transitive dependency; the requested
        // occurrence is queued first and wins.
        let resolution = resolve(&requested(&["useB", "useA"]), &registry);
        let use_b = resolution.hooks.iter().find(|hook| hook.name == "useB").unwrap();
        assert!(use_b.requested);
    }

    #[test]
    fn records_helpers_on_the_owning_hook() {
        let registry: Registry = [RegistryEntry {
            name: "useHash".to_string(),
            local_dependency: vec!["getHash".to_string()],
            ..Default::default()
        }]
        .into_iter()
        .collect();

        let resolution = resolve(&requested(&["useHash"]), &registry);
        assert_eq!(resolution.hooks[0].helpers, vec!["getHash"]);
    }

    #[test]
    fn empty_request_is_an_empty_plan() {
        let registry: Registry = [entry("useA", &[], &[])].into_iter().collect();
        let resolution = resolve(&[], &registry);
        assert_eq!(resolution, Resolution::default());
    }
}
