//! Records interactions into a cassette file.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Cassette, CassetteError, Interaction};
use crate::ports::{RemoteRequest, RemoteResponse, TransportError};

/// Collects interactions and writes them as a YAML cassette file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    base_url: String,
    interactions: Vec<Interaction>,
    next_seq: u64,
}

impl CassetteRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            base_url: base_url.into(),
            interactions: Vec::new(),
            next_seq: 0,
        }
    }

    /// Record one request and its outcome. The `seq` field is assigned automatically.
    pub fn record(
        &mut self,
        request: &RemoteRequest,
        outcome: &Result<RemoteResponse, TransportError>,
    ) {
        self.interactions.push(Interaction::new(self.next_seq, request.clone(), outcome.clone()));
        self.next_seq += 1;
    }

    /// Number of interactions captured so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Returns `true` if nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Finish recording and write the cassette YAML file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, CassetteError> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            base_url: self.base_url,
            interactions: self.interactions,
        };
        cassette.save(&self.path)?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_and_finish() {
        let dir = std::env::temp_dir().join("listwise_recorder_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "test-recording", "http://store.test");
        recorder.record(
            &RemoteRequest::get("/lists"),
            &Ok(RemoteResponse { status: 200, body: json!([]) }),
        );
        recorder.record(
            &RemoteRequest::post("/lists", json!({"name": "Home"})),
            &Ok(RemoteResponse { status: 201, body: json!({"id": "1", "name": "Home"}) }),
        );
        recorder.record(
            &RemoteRequest::get("/lists/9"),
            &Err(TransportError::Other("connection reset".into())),
        );
        assert_eq!(recorder.len(), 3);

        let result_path = recorder.finish().expect("finish should succeed");
        assert_eq!(result_path, path);

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.name, "test-recording");
        assert_eq!(cassette.base_url, "http://store.test");
        let seqs: Vec<u64> = cassette.interactions.iter().map(|i| i.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert_eq!(cassette.interactions[1].route, "POST /lists");
        assert_eq!(
            cassette.interactions[2].outcome(),
            Err(TransportError::Other("connection reset".into()))
        );

        let _ = std::fs::remove_dir_all(&dir);
    }
}
