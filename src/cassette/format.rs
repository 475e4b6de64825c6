//! Cassette data structures for recording and replaying interactions.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::{RemoteRequest, RemoteResponse, TransportError};

/// A single recorded request and what came back.
///
/// Exactly one of `response` and `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// `"METHOD /path"` key, e.g. `"PUT /todos/7"`.
    pub route: String,
    /// The request as sent.
    pub request: RemoteRequest,
    /// What the store answered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<RemoteResponse>,
    /// Why no answer arrived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<TransportError>,
}

impl Interaction {
    /// Captures `request` and its outcome under sequence number `seq`.
    #[must_use]
    pub fn new(
        seq: u64,
        request: RemoteRequest,
        outcome: Result<RemoteResponse, TransportError>,
    ) -> Self {
        let (response, error) = match outcome {
            Ok(response) => (Some(response), None),
            Err(error) => (None, Some(error)),
        };
        Self { seq, route: request.route(), request, response, error }
    }

    /// The recorded outcome, as the transport returned it.
    ///
    /// # Errors
    ///
    /// Returns the recorded transport failure, or an error if the entry
    /// holds neither a response nor a failure.
    pub fn outcome(&self) -> Result<RemoteResponse, TransportError> {
        match (&self.response, &self.error) {
            (_, Some(error)) => Err(error.clone()),
            (Some(response), None) => Ok(response.clone()),
            (None, None) => Err(TransportError::Other(format!(
                "Cassette entry {} ({}) has neither a response nor an error",
                self.seq, self.route
            ))),
        }
    }
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Base URL of the store the traffic went to.
    pub base_url: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

/// Reading or writing a cassette file failed.
#[derive(Debug, thiserror::Error)]
pub enum CassetteError {
    /// Filesystem error.
    #[error("cassette I/O error on {path}: {source}")]
    Io {
        /// File involved.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// YAML (de)serialization error.
    #[error("malformed cassette {path}: {source}")]
    Yaml {
        /// File involved.
        path: String,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },
}

impl Cassette {
    /// Reads a cassette from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CassetteError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|source| CassetteError::Io { path: display.clone(), source })?;
        serde_yaml::from_str(&content)
            .map_err(|source| CassetteError::Yaml { path: display, source })
    }

    /// Writes the cassette as YAML, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), CassetteError> {
        let display = path.display().to_string();
        let yaml = serde_yaml::to_string(self)
            .map_err(|source| CassetteError::Yaml { path: display.clone(), source })?;
        std::fs::write(path, yaml).map_err(|source| CassetteError::Io { path: display, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_cassette() -> Cassette {
        let get = RemoteRequest::get("/lists");
        let put = RemoteRequest::put("/todos/7", json!({"completed": true}));
        Cassette {
            name: "test-cassette".into(),
            recorded_at: Utc::now(),
            base_url: "http://store.test".into(),
            interactions: vec![
                Interaction::new(
                    0,
                    get,
                    Ok(RemoteResponse { status: 200, body: json!([{"id": "1", "name": "Home"}]) }),
                ),
                Interaction::new(
                    1,
                    put,
                    Err(TransportError::Timeout("http://store.test/todos/7".into())),
                ),
                Interaction::new(
                    2,
                    RemoteRequest::get("/lists/3"),
                    Err(TransportError::Connect {
                        url: "http://store.test/lists/3".into(),
                        message: "connection refused".into(),
                    }),
                ),
            ],
        }
    }

    #[test]
    fn file_round_trip_keeps_failures() {
        let dir = std::env::temp_dir().join("listwise_cassette_format_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sample.cassette.yaml");

        let cassette = sample_cassette();
        cassette.save(&path).unwrap();
        let loaded = Cassette::load(&path).unwrap();

        assert_eq!(cassette, loaded);
        assert_eq!(
            loaded.interactions[1].outcome(),
            Err(TransportError::Timeout("http://store.test/todos/7".into()))
        );
        assert!(matches!(loaded.interactions[2].outcome(), Err(TransportError::Connect { .. })));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn entry_without_outcome_is_an_error() {
        let mut entry = Interaction::new(0, RemoteRequest::get("/lists"), Ok(RemoteResponse {
            status: 200,
            body: json!([]),
        }));
        entry.response = None;
        assert!(matches!(entry.outcome(), Err(TransportError::Other(_))));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Cassette::load(Path::new("/nonexistent/listwise.cassette.yaml")).unwrap_err();
        assert!(matches!(err, CassetteError::Io { .. }));
    }
}
