//! Service context bundling the remote transport.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::{InMemoryRemote, LiveRemote, RecordingRemote, ReplayingRemote};
use crate::api::TodoApi;
use crate::cassette::session::RecordingSession;
use crate::cassette::Cassette;
use crate::client::TodoClient;
use crate::config::Config;
use crate::ports::RemoteTransport;

/// Holds the transport every command talks to.
///
/// Constructors wire up different adapter implementations (live, recording,
/// replaying, in-memory).
pub struct ServiceContext {
    /// Transport to the list/todo store.
    pub remote: Box<dyn RemoteTransport>,
}

impl ServiceContext {
    /// Talks to the configured store over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn live(config: &Config) -> Result<Self, String> {
        let remote = LiveRemote::new(&config.api_url, config.timeout).map_err(|e| e.to_string())?;
        Ok(Self { remote: Box::new(remote) })
    }

    /// Talks to the store over HTTP and records every exchange.
    ///
    /// The returned session must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory or HTTP client cannot be created.
    pub fn recording_at(config: &Config, root: &Path) -> Result<(Self, RecordingSession), String> {
        let live = Self::live(config)?;
        let session = RecordingSession::new(root, &config.api_url)?;
        let remote = RecordingRemote::new(live.remote, Arc::clone(&session.recorder));
        Ok((Self { remote: Box::new(remote) }, session))
    }

    /// Serves store traffic from a recorded cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path).map_err(|e| e.to_string())?;
        Ok(Self { remote: Box::new(ReplayingRemote::new(&cassette)) })
    }

    /// Uses an in-process store.
    #[must_use]
    pub fn in_memory(store: Arc<InMemoryRemote>) -> Self {
        Self { remote: Box::new(store) }
    }

    /// Picks replay, recording or live according to `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected adapter cannot be set up.
    pub fn from_config(config: &Config) -> Result<(Self, Option<RecordingSession>), String> {
        if let Some(path) = &config.replay_cassette {
            return Ok((Self::replaying(path)?, None));
        }
        if let Some(root) = &config.record_dir {
            let (ctx, session) = Self::recording_at(config, root)?;
            return Ok((ctx, Some(session)));
        }
        Ok((Self::live(config)?, None))
    }

    /// Cached client over this context's transport.
    #[must_use]
    pub fn client(self) -> TodoClient {
        TodoClient::new(TodoApi::new(self.remote))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use crate::ports::{RemoteRequest, RemoteResponse};
    use chrono::Utc;
    use serde_json::json;

    #[tokio::test]
    async fn replaying_context_serves_recorded_lists() {
        let dir = std::env::temp_dir().join("listwise_ctx_test_replay");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.cassette.yaml");

        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            base_url: "http://store.test".into(),
            interactions: vec![Interaction::new(
                0,
                RemoteRequest::get("/lists"),
                Ok(RemoteResponse { status: 200, body: json!([{"id": "1", "name": "Home"}]) }),
            )],
        }
        .save(&path)
        .unwrap();

        let client = ServiceContext::replaying(&path).unwrap().client();
        let lists = client.lists().await.unwrap();
        assert_eq!(lists[0].name, "Home");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_cassette_is_an_error() {
        let config = Config {
            replay_cassette: Some("/nonexistent/listwise.cassette.yaml".into()),
            ..Config::default()
        };
        assert!(ServiceContext::from_config(&config).is_err());
    }

    #[tokio::test]
    async fn in_memory_context_shares_the_store() {
        let store = Arc::new(InMemoryRemote::new());
        let client = ServiceContext::in_memory(Arc::clone(&store)).client();
        client.create_list_named("Home").await.unwrap();
        assert_eq!(store.requests().len(), 1);
    }
}
