// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing lifecycle events.
//!
//! Schedulers hold a [`DiagnosticsHandle`] and send events through a bounded
//! channel; the [`DiagnosticsCollector`] drains them into a circular buffer.

use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use super::export::{write_atomic, DiagnosticReport, ReportSummary, SerializableEvent};
use super::{BufferCapacity, CircularBuffer, DiagnosticEvent, ToastEvent};
use crate::error::Result;

/// Handle for sending diagnostic events to the collector.
///
/// This handle is cheap to clone and can be shared across threads.
/// Sends never block; events are dropped when the channel is full.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Logs a lifecycle event.
    pub fn log(&self, kind: ToastEvent) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }

    /// Attempts to send an event, returning an error if the channel is full
    /// or the collector has been dropped.
    pub fn try_log(&self, kind: ToastEvent) -> std::result::Result<(), TrySendError<DiagnosticEvent>> {
        self.event_tx.try_send(DiagnosticEvent::new(kind))
    }
}

/// Default channel capacity for event buffering.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Central collector for lifecycle events.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    /// Outcome counts over every drained event.
    summary: ReportSummary,
    /// Monotonic start, used for event offsets.
    collection_started_at: Instant,
    /// Wall clock start, used for report metadata.
    collection_started_at_utc: DateTime<Utc>,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_channel_capacity(capacity, DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a collector whose channel buffers at most `channel_capacity`
    /// undrained events.
    #[must_use]
    pub fn with_channel_capacity(capacity: BufferCapacity, channel_capacity: usize) -> Self {
        let (event_tx, event_rx) = bounded(channel_capacity);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            summary: ReportSummary::default(),
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Moves all pending events from the channel into the buffer.
    ///
    /// Events are counted in the summary as they are drained, so the
    /// summary stays exact after the buffer starts evicting.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.summary.record(&event.kind);
            self.buffer.push(event);
        }
    }

    /// Outcome counts over every event drained so far.
    #[must_use]
    pub fn summary(&self) -> &ReportSummary {
        &self.summary
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns an iterator over all stored events (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    #[must_use]
    pub fn collection_started_at_utc(&self) -> DateTime<Utc> {
        self.collection_started_at_utc
    }

    /// Builds a report from the buffered events.
    ///
    /// Pending channel events are not included; call
    /// [`process_pending`](Self::process_pending) first.
    #[must_use]
    pub fn build_report(&self) -> DiagnosticReport {
        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| SerializableEvent {
                offset_ms: event
                    .timestamp
                    .saturating_duration_since(self.collection_started_at)
                    .as_millis()
                    .try_into()
                    .unwrap_or(u64::MAX),
                event: event.kind.clone(),
            })
            .collect();

        DiagnosticReport {
            generated_at: Utc::now().to_rfc3339(),
            collection_started_at: self.collection_started_at_utc.to_rfc3339(),
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
            summary: self.summary.clone(),
            evicted_events: self.buffer.evicted(),
            events,
        }
    }

    /// Serializes the report as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.build_report())?)
    }

    /// Writes the report as JSON to `path`.
    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        write_atomic(path, &json)?;
        Ok(())
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

impl std::fmt::Debug for DiagnosticsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsCollector")
            .field("len", &self.buffer.len())
            .field("capacity", &self.buffer.capacity())
            .finish_non_exhaustive()
    }
}
