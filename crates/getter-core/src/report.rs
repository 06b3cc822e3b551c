//! Per-run accounting across every URL a single invocation attempted.

use serde::Serialize;

/// Outcome of downloading one URL.
#[derive(Debug, Clone, Serialize)]
pub struct UrlOutcome {
    pub url: String,
    pub succeeded: bool,
    pub bytes_written: u64,
}

/// Accumulated across every URL in a run; printed as the final summary and,
/// optionally, serialized as JSON.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DownloadReport {
    pub outcomes: Vec<UrlOutcome>,
}

impl DownloadReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, url: String, succeeded: bool, bytes_written: u64) {
        self.outcomes.push(UrlOutcome { url, succeeded, bytes_written });
    }

    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.succeeded).count()
    }

    pub fn total_bytes(&self) -> u64 {
        self.outcomes.iter().map(|o| o.bytes_written).sum()
    }
}
