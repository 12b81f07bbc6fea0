use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;

use crate::utils::log_sanitizer::{flatten_for_log, redact_credentials};

/// Append-only free-text log of SXAPI traffic, one line per entry.
///
/// Write failures are reported through tracing and never abort the call
/// being logged.
#[derive(Debug, Clone)]
pub struct RequestLog {
    path: PathBuf,
}

impl RequestLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Request body as compact JSON, password redacted.
    pub fn request(&self, body: &Value) {
        self.append(&redact_credentials(body).to_string());
    }

    /// Raw response text as received.
    pub fn response(&self, text: &str) {
        self.append(&flatten_for_log(text));
    }

    /// `<utc timestamp>: <label> - <summary json>`
    pub fn summary(&self, label: &str, summary: &Value) {
        self.append(&format!("{}: {} - {}", Utc::now(), label, summary));
    }

    fn append(&self, line: &str) {
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{}", line));

        if let Err(e) = written {
            tracing::warn!("Failed to write SXAPI request log {}: {}", self.path.display(), e);
        }
    }
}
