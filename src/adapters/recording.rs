//! Recording adapter for the `RemoteTransport` port.

use std::sync::{Arc, Mutex, PoisonError};

use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{RemoteRequest, RemoteTransport, TransportFuture};

/// Records store traffic while delegating to an inner transport.
pub struct RecordingRemote {
    inner: Box<dyn RemoteTransport>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingRemote {
    /// Creates a recording transport wrapping the given implementation.
    pub fn new(inner: Box<dyn RemoteTransport>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl RemoteTransport for RecordingRemote {
    fn send(&self, request: &RemoteRequest) -> TransportFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let outcome = self.inner.send(&request).await;
            self.recorder.lock().unwrap_or_else(PoisonError::into_inner).record(&request, &outcome);
            outcome
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRemote;
    use crate::cassette::Cassette;
    use serde_json::json;

    #[tokio::test]
    async fn records_requests_and_passes_responses_through() {
        let dir = std::env::temp_dir().join("listwise_rec_remote_test");
        std::fs::create_dir_all(&dir).unwrap();
        let cassette_path = dir.join("remote.cassette.yaml");

        let recorder =
            Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "test", "memory://")));

        {
            let remote =
                RecordingRemote::new(Box::new(InMemoryRemote::new()), Arc::clone(&recorder));
            let created =
                remote.send(&RemoteRequest::post("/lists", json!({"name": "Home"}))).await.unwrap();
            assert_eq!(created.status, 201);
            let missing = remote.send(&RemoteRequest::get("/lists/99")).await.unwrap();
            assert_eq!(missing.status, 404);
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let cassette = Cassette::load(&cassette_path).unwrap();
        let routes: Vec<&str> = cassette.interactions.iter().map(|i| i.route.as_str()).collect();
        assert_eq!(routes, vec!["POST /lists", "GET /lists/99"]);
        assert_eq!(cassette.interactions[1].outcome().unwrap().status, 404);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
