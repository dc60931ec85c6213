// SPDX-License-Identifier: MPL-2.0
//! Diagnostic report structures and JSON export.

use std::fs;
use std::io;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use super::events::ToastEvent;

/// An event with its time relative to the start of collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableEvent {
    /// Milliseconds since collection started.
    pub offset_ms: u64,
    #[serde(flatten)]
    pub event: ToastEvent,
}

/// Aggregated counts over the reported events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub queued: usize,
    pub completed: usize,
    pub dropped: usize,
}

impl ReportSummary {
    /// Counts one event.
    pub fn record(&mut self, event: &ToastEvent) {
        match event {
            ToastEvent::Queued { .. } => self.queued += 1,
            ToastEvent::Completed { .. } => self.completed += 1,
            ToastEvent::Dropped { .. } => self.dropped += 1,
            _ => {}
        }
    }

    /// Counts lifecycle outcomes in `events`.
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a ToastEvent>) -> Self {
        let mut summary = Self::default();
        for event in events {
            summary.record(event);
        }
        summary
    }
}

/// A complete diagnostics report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    /// When the report was generated (RFC 3339).
    pub generated_at: String,
    /// When collection started (RFC 3339).
    pub collection_started_at: String,
    pub crate_version: String,
    /// Counts over every event collected, including evicted ones.
    pub summary: ReportSummary,
    /// Events that no longer fit the buffer and are missing from `events`.
    #[serde(default)]
    pub evicted_events: usize,
    pub events: Vec<SerializableEvent>,
}

/// Generates a default filename with the local timestamp.
///
/// Format: `toast_queue_diagnostics_YYYYMMDD_HHMMSS.json`
#[must_use]
pub fn generate_default_filename() -> String {
    let now = Local::now();
    format!("toast_queue_diagnostics_{}.json", now.format("%Y%m%d_%H%M%S"))
}

/// Writes `content` next to `path` and renames it into place.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = path.with_extension("json.tmp");

    fs::write(&temp_path, content)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}
