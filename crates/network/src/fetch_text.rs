use crate::ThrottledClient;
use derive_more::{Display, Error};
use miette::Diagnostic;
use reqwest::StatusCode;

/// Error type of [`ThrottledClient::fetch_text`].
///
/// A missing remote file ([`NotFound`](FetchTextError::NotFound)) is kept apart
/// from transient failures so callers can decide between "does not exist" and
/// "could not reach".
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum FetchTextError {
    #[display("Remote file not found at {url}")]
    #[diagnostic(code(hooksmith_network::not_found))]
    NotFound { url: String },

    #[display("Failed to fetch {url}: {error}")]
    #[diagnostic(code(hooksmith_network::request))]
    Request {
        url: String,
        #[error(source)]
        error: reqwest::Error,
    },

    #[display("Unexpected status {status} while fetching {url}")]
    #[diagnostic(code(hooksmith_network::status))]
    Status { url: String, status: StatusCode },
}

impl FetchTextError {
    /// Whether the failure means the remote file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchTextError::NotFound { .. })
    }

    pub fn url(&self) -> &str {
        match self {
            FetchTextError::NotFound { url }
            | FetchTextError::Request { url, .. }
            | FetchTextError::Status { url, .. } => url,
        }
    }
}

impl ThrottledClient {
    /// Download a remote file as text.
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchTextError> {
        let request_error =
            |error| FetchTextError::Request { url: url.to_string(), error };

        let response = self
            .run_with_permit(|client| client.get(url).send())
            .await
            .map_err(request_error)?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(FetchTextError::NotFound { url: url.to_string() })
            }
            status if !status.is_success() => {
                return Err(FetchTextError::Status { url: url.to_string(), status })
            }
            _ => {}
        }

        tracing::debug!(target: "hooksmith::fetch", ?url, "Download completed");

        response.text().await.map_err(request_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn fetches_text_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/hooks/useFoo/useFoo.ts")
            .with_status(200)
            .with_body("export const useFoo = () => {};")
            .create_async()
            .await;

        let client = ThrottledClient::new_from_cpu_count();
        let url = format!("{}/hooks/useFoo/useFoo.ts", server.url());
        let text = client.fetch_text(&url).await.unwrap();

        assert_eq!(text, "export const useFoo = () => {};");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn distinguishes_not_found_from_other_statuses() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/gone.ts").with_status(404).create_async().await;
        server.mock("GET", "/broken.ts").with_status(500).create_async().await;

        let client = ThrottledClient::new_from_cpu_count();

        let not_found =
            client.fetch_text(&format!("{}/gone.ts", server.url())).await.unwrap_err();
        assert!(not_found.is_not_found());

        let server_error =
            client.fetch_text(&format!("{}/broken.ts", server.url())).await.unwrap_err();
        assert!(!server_error.is_not_found());
        assert!(matches!(server_error, FetchTextError::Status { .. }));
    }
}
