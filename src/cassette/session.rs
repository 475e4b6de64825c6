//! Recording session owning the cassette recorder for one CLI run.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// File name of the cassette written inside a session directory.
pub const CASSETTE_FILE: &str = "remote.cassette.yaml";

/// Owns the shared recorder that recording adapters write into.
///
/// Cassettes are stored in a timestamped directory under the configured
/// record root: `<root>/<timestamp>/remote.cassette.yaml`.
pub struct RecordingSession {
    /// Recorder shared with the recording transport.
    pub recorder: Arc<Mutex<CassetteRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a new recording session under `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The timestamped directory already exists
    /// - The directory cannot be created
    pub fn new(root: &Path, base_url: &str) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = root.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }

        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let recorder = CassetteRecorder::new(
            output_dir.join(CASSETTE_FILE),
            format!("{timestamp}-remote"),
            base_url,
        );

        Ok(Self { recorder: Arc::new(Mutex::new(recorder)), output_dir })
    }

    /// Directory the cassette will be written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the cassette file to disk.
    ///
    /// Every recording transport holding the recorder must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorder is still shared or the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording transport still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))?;
        Ok(self.output_dir)
    }
}
