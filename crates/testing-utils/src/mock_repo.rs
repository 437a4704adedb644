use hooksmith_config::Settings;
use mockito::{Mock, Server, ServerGuard};

/// In-process stand-in for the remote hook repository.
///
/// Mounts hook, helper and utility sources (and optionally a registry
/// snapshot) on a [`mockito`] server laid out exactly like the real remote
/// URL templates. Keep the fixture alive for as long as requests are made.
pub struct MockRepo {
    server: ServerGuard,
}

impl MockRepo {
    pub async fn start() -> Self {
        MockRepo { server: Server::new_async().await }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Settings pointing a default project layout at this mock repository.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        settings.registry = self.url();
        settings
    }

    pub async fn add_hook(&mut self, name: &str, source: &str) -> Mock {
        self.server
            .mock("GET", format!("/hooks/{name}/{name}.ts").as_str())
            .with_body(source)
            .create_async()
            .await
    }

    pub async fn add_helper(&mut self, hook: &str, helper: &str, source: &str) -> Mock {
        self.server
            .mock("GET", format!("/hooks/{hook}/helpers/{helper}.ts").as_str())
            .with_body(source)
            .create_async()
            .await
    }

    pub async fn add_util(&mut self, symbol: &str, source: &str) -> Mock {
        self.server
            .mock("GET", format!("/utils/{symbol}.ts").as_str())
            .with_body(source)
            .create_async()
            .await
    }

    /// Like [`add_util`](MockRepo::add_util), but asserting an exact hit count.
    pub async fn add_util_counted(&mut self, symbol: &str, source: &str, hits: usize) -> Mock {
        self.server
            .mock("GET", format!("/utils/{symbol}.ts").as_str())
            .with_body(source)
            .expect(hits)
            .create_async()
            .await
    }

    /// Mount a registry snapshot document at the well-known path.
    pub async fn add_snapshot(&mut self, snapshot: &serde_json::Value) -> Mock {
        self.server
            .mock("GET", "/registry.json")
            .with_body(snapshot.to_string())
            .create_async()
            .await
    }
}
