// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for the toast lifecycle.
//!
//! One toast produces `Queued`, `Started`, then either `Dropped` or the
//! `Attached` / `Shown` / `Hidden` / `Completed` sequence.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Why a request was discarded without being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// No explicit target, no active surface and no root surface.
    NoSurface,
}

/// A step in the life of one toast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ToastEvent {
    /// Request appended to the queue.
    Queued {
        id: u64,
        length_secs: f64,
        /// Queue length after the append.
        queued: usize,
    },
    /// Request removed from the queue; the running flag is set.
    Started { id: u64 },
    /// Visual element inserted on its surface.
    Attached { id: u64 },
    /// Fade-in finished; the toast holds for `hold_ms`.
    Shown { id: u64, hold_ms: u64 },
    /// Fade-out finished.
    Hidden { id: u64 },
    /// Element detached; the next request may start.
    Completed { id: u64 },
    /// Request discarded; the next request may start.
    Dropped { id: u64, reason: DropReason },
}

impl ToastEvent {
    /// Returns the id of the toast this event belongs to.
    #[must_use]
    pub fn toast_id(&self) -> u64 {
        match self {
            ToastEvent::Queued { id, .. }
            | ToastEvent::Started { id }
            | ToastEvent::Attached { id }
            | ToastEvent::Shown { id, .. }
            | ToastEvent::Hidden { id }
            | ToastEvent::Completed { id }
            | ToastEvent::Dropped { id, .. } => *id,
        }
    }
}

/// A timestamped lifecycle event.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event was recorded (monotonic clock).
    pub timestamp: Instant,
    pub kind: ToastEvent,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: ToastEvent) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}
