use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One hook's record in the registry snapshot.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    /// Unique hook name (`useFoo`).
    #[serde(default)]
    pub name: String,

    /// Other hooks this hook statically imports.
    #[serde(default)]
    pub hook_dependency: Vec<String>,

    /// Symbols this hook imports from the shared utility module.
    #[serde(default)]
    pub utils_dependency: Vec<String>,

    /// Local helper files nested under the hook's own directory.
    #[serde(default)]
    pub local_dependency: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_url: Option<String>,
}

impl RegistryEntry {
    /// A hook never depends on itself.
    fn drop_self_reference(&mut self) {
        let name = self.name.clone();
        self.hook_dependency.retain(|dependency| dependency != &name);
    }
}

/// Name-keyed snapshot of every known hook.
///
/// Built once per snapshot, read-only at install time.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Registry {
    entries: BTreeMap<String, RegistryEntry>,
}

/// The snapshot document is either an array of entries or a name-keyed map.
#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    List(Vec<RegistryEntry>),
    Map(BTreeMap<String, RegistryEntry>),
}

impl<'de> Deserialize<'de> for Registry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let snapshot = Snapshot::deserialize(deserializer)?;
        Ok(match snapshot {
            Snapshot::List(entries) => entries.into_iter().collect(),
            Snapshot::Map(map) => map
                .into_iter()
                .map(|(name, mut entry)| {
                    // The map key is authoritative for the name.
                    entry.name = name;
                    entry
                })
                .collect(),
        })
    }
}

impl FromIterator<RegistryEntry> for Registry {
    fn from_iter<Iter: IntoIterator<Item = RegistryEntry>>(entries: Iter) -> Self {
        let mut registry = Registry::default();
        for entry in entries {
            registry.insert(entry);
        }
        registry
    }
}

impl Registry {
    pub fn insert(&mut self, mut entry: RegistryEntry) -> Option<RegistryEntry> {
        entry.drop_self_reference();
        self.entries.insert(entry.name.clone(), entry)
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
