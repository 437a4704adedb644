use crate::{Registry, RegistryEntry};
use derive_more::{Display, Error};
use futures_util::future;
use hooksmith_extractor::{extract_imports, is_hook_name};
use hooksmith_network::{FetchTextError, ThrottledClient};
use miette::Diagnostic;
use pipe_trait::Pipe;
use serde::Deserialize;

/// One record of the remote component directory listing.
#[derive(Debug, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl DirectoryEntry {
    /// A candidate is a directory entry whose name follows the hook convention.
    fn is_candidate(&self) -> bool {
        self.kind == "dir" && is_hook_name(&self.name)
    }
}

/// This subroutine rebuilds the registry snapshot by crawling the remote
/// component directory.
///
/// Each candidate's source is fetched once and scanned for imports. Entries
/// already present in `prior` are reused without a fetch unless `force` is
/// set. A candidate whose source cannot be fetched is logged and left out;
/// one broken hook does not abort the crawl.
#[must_use]
pub struct BuildRegistry<'a> {
    pub http_client: &'a ThrottledClient,
    /// URL returning the `[{name, path, type}]` directory listing.
    pub listing_url: &'a str,
    /// Root URL that hook sources are fetched from.
    pub repo_root: &'a str,
    /// Prior snapshot for incremental updates.
    pub prior: Option<&'a Registry>,
    /// Re-fetch even when a prior entry exists.
    pub force: bool,
}

/// Error type of [`BuildRegistry`].
///
/// Only the listing itself is load-bearing; per-candidate failures degrade
/// to skipped entries.
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum BuildRegistryError {
    #[diagnostic(transparent)]
    FetchListing(#[error(source)] FetchTextError),

    #[display("Failed to parse the directory listing at {url}: {error}")]
    #[diagnostic(code(hooksmith_registry::parse_listing))]
    ParseListing {
        url: String,
        #[error(source)]
        error: serde_json::Error,
    },
}

impl<'a> BuildRegistry<'a> {
    /// Execute the subroutine.
    pub async fn run(self) -> Result<Registry, BuildRegistryError> {
        let BuildRegistry { http_client, listing_url, repo_root, prior, force } = self;

        let listing_text = http_client
            .fetch_text(listing_url)
            .await
            .map_err(BuildRegistryError::FetchListing)?;
        let listing: Vec<DirectoryEntry> = serde_json::from_str(&listing_text)
            .map_err(|error| BuildRegistryError::ParseListing {
                url: listing_url.to_string(),
                error,
            })?;

        tracing::info!(target: "hooksmith::registry", candidates = listing.len(), "Crawl listing");

        let registry = listing
            .iter()
            .filter(|entry| entry.is_candidate())
            .map(|entry| async move {
                if !force {
                    if let Some(known) = prior.and_then(|prior| prior.get(&entry.name)) {
                        tracing::debug!(
                            target: "hooksmith::registry",
                            name = entry.name,
                            "Reuse prior entry",
                        );
                        return Some(known.clone());
                    }
                }
                build_entry(http_client, repo_root, &entry.name).await
            })
            .pipe(future::join_all)
            .await
            .into_iter()
            .flatten()
            .collect();

        Ok(registry)
    }
}

/// Fetch one hook's source and derive its registry entry from its imports.
async fn build_entry(
    http_client: &ThrottledClient,
    repo_root: &str,
    name: &str,
) -> Option<RegistryEntry> {
    let source_url = format!("{repo_root}/hooks/{name}/{name}.ts");
    let source = match http_client.fetch_text(&source_url).await {
        Ok(source) => source,
        Err(error) => {
            tracing::warn!(target: "hooksmith::registry", name, %error, "Skip unreadable hook");
            return None;
        }
    };

    let imports = extract_imports(&source);
    Some(RegistryEntry {
        name: name.to_string(),
        hook_dependency: imports.hooks.into_iter().collect(),
        utils_dependency: imports.utils.into_iter().collect(),
        local_dependency: imports.helpers.into_iter().collect(),
        bundle_url: Some(format!("{repo_root}/bundles/{name}.js")),
        source_url: Some(source_url),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LISTING: &str = r#"[
        {"name": "useCounter", "path": "hooks/useCounter", "type": "dir"},
        {"name": "useEvent", "path": "hooks/useEvent", "type": "dir"},
        {"name": "README.md", "path": "hooks/README.md", "type": "file"},
        {"name": "shared", "path": "hooks/shared", "type": "dir"}
    ]"#;

    #[tokio::test]
    async fn crawls_convention_matching_directories() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/listing").with_body(LISTING).create_async().await;
        server
            .mock("GET", "/hooks/useCounter/useCounter.ts")
            .with_body("export const useCounter = () => {};")
            .create_async()
            .await;
        server
            .mock("GET", "/hooks/useEvent/useEvent.ts")
            .with_body(
                "import { useCounter } from '../useCounter/useCounter';\n\
                 import { isClient } from '@/utils';\n",
            )
            .create_async()
            .await;

        let http_client = ThrottledClient::new_from_cpu_count();
        let registry = BuildRegistry {
            http_client: &http_client,
            listing_url: &format!("{}/listing", server.url()),
            repo_root: &server.url(),
            prior: None,
            force: false,
        }
        .run()
        .await
        .unwrap();

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["useCounter", "useEvent"]);
        let use_event = registry.get("useEvent").unwrap();
        assert_eq!(use_event.hook_dependency, vec!["useCounter"]);
        assert_eq!(use_event.utils_dependency, vec!["isClient"]);
    }

    #[tokio::test]
    async fn reuses_prior_entries_without_fetching() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/listing")
            .with_body(r#"[{"name": "useCounter", "path": "hooks/useCounter", "type": "dir"}]"#)
            .create_async()
            .await;
        let source_mock = server
            .mock("GET", "/hooks/useCounter/useCounter.ts")
            .with_body("export const useCounter = () => {};")
            .expect(0)
            .create_async()
            .await;

        let prior: Registry = [RegistryEntry {
            name: "useCounter".to_string(),
            utils_dependency: vec!["isClient".to_string()],
            ..Default::default()
        }]
        .into_iter()
        .collect();

        let http_client = ThrottledClient::new_from_cpu_count();
        let registry = BuildRegistry {
            http_client: &http_client,
            listing_url: &format!("{}/listing", server.url()),
            repo_root: &server.url(),
            prior: Some(&prior),
            force: false,
        }
        .run()
        .await
        .unwrap();

        assert_eq!(registry.get("useCounter").unwrap().utils_dependency, vec!["isClient"]);
        source_mock.assert_async().await;
    }

    #[tokio::test]
    async fn skips_candidates_whose_source_cannot_be_fetched() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/listing")
            .with_body(
                r#"[
                    {"name": "useCounter", "path": "hooks/useCounter", "type": "dir"},
                    {"name": "useBroken", "path": "hooks/useBroken", "type": "dir"}
                ]"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/hooks/useCounter/useCounter.ts")
            .with_body("export const useCounter = () => {};")
            .create_async()
            .await;
        server.mock("GET", "/hooks/useBroken/useBroken.ts").with_status(404).create_async().await;

        let http_client = ThrottledClient::new_from_cpu_count();
        let registry = BuildRegistry {
            http_client: &http_client,
            listing_url: &format!("{}/listing", server.url()),
            repo_root: &server.url(),
            prior: None,
            force: false,
        }
        .run()
        .await
        .unwrap();

        assert!(registry.contains("useCounter"));
        assert!(!registry.contains("useBroken"));
    }
}
