use crate::Registry;
use derive_more::{Display, Error};
use hooksmith_network::{FetchTextError, ThrottledClient};
use miette::Diagnostic;

/// This subroutine downloads and parses the registry snapshot.
///
/// Any failure here means the registry is unavailable, which is fatal to the
/// command: without a snapshot there is nothing to resolve against.
#[must_use]
pub struct LoadRegistry<'a> {
    pub http_client: &'a ThrottledClient,
    /// URL of the snapshot document.
    pub snapshot_url: &'a str,
}

/// Error type of [`LoadRegistry`].
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum LoadRegistryError {
    #[diagnostic(transparent)]
    Fetch(#[error(source)] FetchTextError),

    #[display("Failed to parse the registry snapshot at {url}: {error}")]
    #[diagnostic(code(hooksmith_registry::parse_snapshot))]
    Parse {
        url: String,
        #[error(source)]
        error: serde_json::Error,
    },
}

impl<'a> LoadRegistry<'a> {
    /// Execute the subroutine.
    pub async fn run(self) -> Result<Registry, LoadRegistryError> {
        let LoadRegistry { http_client, snapshot_url } = self;

        let text =
            http_client.fetch_text(snapshot_url).await.map_err(LoadRegistryError::Fetch)?;
        let registry: Registry = serde_json::from_str(&text)
            .map_err(|error| LoadRegistryError::Parse { url: snapshot_url.to_string(), error })?;

        tracing::info!(
            target: "hooksmith::registry",
            entries = registry.len(),
            "Loaded registry snapshot",
        );

        Ok(registry)
    }
}
