// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the toast lifecycle.
//!
//! Schedulers optionally carry a [`DiagnosticsHandle`] and report every
//! lifecycle step as a [`ToastEvent`]. Events are stored in a memory-bounded
//! [`CircularBuffer`] owned by the [`DiagnosticsCollector`] and can be
//! exported as a JSON [`DiagnosticReport`].
//!
//! # Architecture
//!
//! - [`DiagnosticsHandle`]: cheap to clone, non-blocking sender
//! - [`DiagnosticsCollector`]: drains the channel, builds reports
//! - [`CircularBuffer`]: ring buffer with validated [`BufferCapacity`]

mod buffer;
mod collector;
mod events;
mod export;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DropReason, ToastEvent};
pub use export::{
    generate_default_filename, write_atomic, DiagnosticReport, ReportSummary, SerializableEvent,
};
