// SPDX-License-Identifier: MPL-2.0
//! Headless presenter that records every call.
//!
//! Animations complete after sleeping their duration on the Tokio clock, so
//! under a paused test runtime the recorded timestamps are exact.

use super::Presenter;
use crate::domain::Frame;
use crate::style::StyleConfig;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// One presenter call.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Attach {
        serial: u64,
        message: String,
        surface: String,
        frame: Frame,
        /// Fade duration of the style the toast was attached with.
        fade: Duration,
    },
    Animate {
        serial: u64,
        target: Frame,
        duration: Duration,
    },
    Detach {
        serial: u64,
    },
}

/// A presenter call with the time it was made.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub at: Instant,
    pub call: RecordedCall,
}

/// Handle to a recorded toast.
#[derive(Debug)]
pub struct RecordingHandle {
    serial: u64,
    frame: Frame,
}

impl RecordingHandle {
    #[must_use]
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Frame reached by the last completed animation.
    #[must_use]
    pub fn frame(&self) -> Frame {
        self.frame
    }
}

#[derive(Debug, Default)]
struct Log {
    calls: Vec<Recorded>,
    next_serial: u64,
    active: usize,
    max_active: usize,
    key_surface: Option<String>,
    root_surface: Option<String>,
}

/// Presenter that keeps a log of attach/animate/detach calls.
///
/// Clones share the same log, so a test can keep one clone and hand the
/// other to a scheduler.
#[derive(Debug, Clone)]
pub struct RecordingPresenter {
    log: Arc<Mutex<Log>>,
}

/// Key surface name used by [`RecordingPresenter::new`].
pub const DEFAULT_KEY_SURFACE: &str = "key-window";

impl RecordingPresenter {
    /// Creates a presenter whose key surface is [`DEFAULT_KEY_SURFACE`].
    #[must_use]
    pub fn new() -> Self {
        let presenter = Self::without_surfaces();
        presenter.set_key_surface(Some(DEFAULT_KEY_SURFACE.to_string()));
        presenter
    }

    /// Creates a presenter with neither a key nor a root surface.
    #[must_use]
    pub fn without_surfaces() -> Self {
        Self {
            log: Arc::new(Mutex::new(Log::default())),
        }
    }

    pub fn set_key_surface(&self, surface: Option<String>) {
        self.lock().key_surface = surface;
    }

    pub fn set_root_surface(&self, surface: Option<String>) {
        self.lock().root_surface = surface;
    }

    /// Returns every recorded call in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Recorded> {
        self.lock().calls.clone()
    }

    /// Returns the messages of attached toasts in attach order.
    #[must_use]
    pub fn attached_messages(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .filter_map(|r| match &r.call {
                RecordedCall::Attach { message, .. } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns the surfaces toasts were attached to, in attach order.
    #[must_use]
    pub fn attached_surfaces(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .filter_map(|r| match &r.call {
                RecordedCall::Attach { surface, .. } => Some(surface.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of toasts currently attached.
    #[must_use]
    pub fn active(&self) -> usize {
        self.lock().active
    }

    /// Highest number of toasts that were attached at the same time.
    #[must_use]
    pub fn max_concurrent(&self) -> usize {
        self.lock().max_active
    }

    fn lock(&self) -> MutexGuard<'_, Log> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: RecordedCall) {
        self.lock().calls.push(Recorded {
            at: Instant::now(),
            call,
        });
    }
}

impl Default for RecordingPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for RecordingPresenter {
    type Surface = String;
    type Handle = RecordingHandle;

    fn key_surface(&self) -> Option<String> {
        self.lock().key_surface.clone()
    }

    fn root_surface(&self) -> Option<String> {
        self.lock().root_surface.clone()
    }

    fn attach(
        &self,
        message: &str,
        style: &StyleConfig,
        surface: &String,
        initial: Frame,
    ) -> RecordingHandle {
        let serial = {
            let mut log = self.lock();
            let serial = log.next_serial;
            log.next_serial += 1;
            log.active += 1;
            log.max_active = log.max_active.max(log.active);
            serial
        };
        self.record(RecordedCall::Attach {
            serial,
            message: message.to_string(),
            surface: surface.clone(),
            frame: initial,
            fade: style.fade(),
        });
        RecordingHandle {
            serial,
            frame: initial,
        }
    }

    async fn animate(&self, handle: &mut RecordingHandle, target: Frame, duration: Duration) {
        self.record(RecordedCall::Animate {
            serial: handle.serial,
            target,
            duration,
        });
        tokio::time::sleep(duration).await;
        handle.frame = target;
    }

    fn detach(&self, handle: RecordingHandle) {
        self.record(RecordedCall::Detach {
            serial: handle.serial,
        });
        let mut log = self.lock();
        log.active = log.active.saturating_sub(1);
    }
}
