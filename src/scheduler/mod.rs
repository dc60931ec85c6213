// SPDX-License-Identifier: MPL-2.0
//! The toast scheduler.
//!
//! [`ToastScheduler`] accepts toast requests from any caller and shows them
//! one at a time, in submission order. It owns a FIFO queue and a running
//! flag; the flag is the only gate between "a toast is on screen" and "the
//! next one may start".
//!
//! # Chaining
//!
//! `submit` appends and calls `try_advance`. `try_advance` returns at once if
//! the queue is empty or a presentation is running; otherwise it sets the
//! flag, pops the head and spawns the presentation on the Tokio runtime.
//! When the presentation has been torn down, the task clears the flag and
//! calls `try_advance` again. The state lock is never held across a
//! presenter call or an `.await`, so `try_advance` is safe to re-enter from
//! a completion.
//!
//! # Usage
//!
//! ```no_run
//! use toast_queue::domain::ToastRequest;
//! use toast_queue::presenter::TerminalPresenter;
//! use toast_queue::scheduler::ToastScheduler;
//!
//! # async fn demo() -> toast_queue::error::Result<()> {
//! let toasts = ToastScheduler::new(TerminalPresenter::new())?;
//!
//! toasts.submit("Saved");
//! toasts.submit(ToastRequest::new("Copied to clipboard").short());
//!
//! toasts.wait_idle().await;
//! # Ok(())
//! # }
//! ```

mod lifecycle;
mod surface;

pub use surface::resolve_surface;

use crate::diagnostics::{DiagnosticsHandle, DropReason, ToastEvent};
use crate::domain::ToastRequest;
use crate::error::Result;
use crate::presenter::Presenter;
use crate::style::StyleConfig;
use lifecycle::Presentation;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tokio::runtime::Handle;
use tokio::sync::watch;

/// Observable queue state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueStatus {
    /// Requests waiting behind the current presentation.
    pub queued: usize,
    /// Whether a presentation is between start and teardown.
    pub presenting: bool,
}

impl QueueStatus {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queued == 0 && !self.presenting
    }
}

struct QueueState<S> {
    queue: VecDeque<ToastRequest<S>>,
    running: bool,
}

struct Inner<P: Presenter> {
    presenter: P,
    state: Mutex<QueueState<P::Surface>>,
    style: RwLock<StyleConfig>,
    status: watch::Sender<QueueStatus>,
    runtime: Handle,
    diagnostics: Option<DiagnosticsHandle>,
}

impl<P: Presenter> Inner<P> {
    fn lock_state(&self) -> MutexGuard<'_, QueueState<P::Surface>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &QueueState<P::Surface>) {
        self.status.send_replace(QueueStatus {
            queued: state.queue.len(),
            presenting: state.running,
        });
    }

    fn log(&self, event: ToastEvent) {
        if let Some(handle) = &self.diagnostics {
            handle.log(event);
        }
    }

    fn style_snapshot(&self) -> StyleConfig {
        self.style
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Clears the running flag.
    fn finish(&self) {
        let mut state = self.lock_state();
        state.running = false;
        self.publish(&state);
    }
}

/// Clears the running flag and advances the queue when dropped.
///
/// Created before the presentation task is spawned and owned by its future,
/// so the queue keeps moving when the presenter panics mid-lifecycle or the
/// task never runs at all.
struct Completion<P: Presenter> {
    inner: Arc<Inner<P>>,
    id: u64,
}

impl<P: Presenter> Drop for Completion<P> {
    fn drop(&mut self) {
        self.inner.log(ToastEvent::Completed { id: self.id });
        self.inner.finish();
        try_advance(&self.inner);
    }
}

/// Starts the next request unless one is running or the queue is empty.
fn try_advance<P: Presenter>(inner: &Arc<Inner<P>>) {
    loop {
        let request = {
            let mut state = inner.lock_state();
            if state.running {
                return;
            }
            let Some(request) = state.queue.pop_front() else {
                return;
            };
            state.running = true;
            inner.publish(&state);
            request
        };

        let style = inner.style_snapshot();
        let (id, target, message, length) = request.into_parts();
        inner.log(ToastEvent::Started { id: id.value() });

        match resolve_surface(&inner.presenter, target) {
            Some(surface) => {
                let presentation = Presentation {
                    id,
                    message,
                    length,
                    style,
                };
                spawn_presentation(inner, surface, presentation);
                return;
            }
            None => {
                inner.log(ToastEvent::Dropped {
                    id: id.value(),
                    reason: DropReason::NoSurface,
                });
                inner.finish();
            }
        }
    }
}

fn spawn_presentation<P: Presenter>(
    inner: &Arc<Inner<P>>,
    surface: P::Surface,
    presentation: Presentation,
) {
    let completion = Completion {
        inner: Arc::clone(inner),
        id: presentation.id.value(),
    };
    // A runtime that has shut down drops the future unpolled, which still
    // drops the guard.
    inner.runtime.spawn(async move {
        let inner = &completion.inner;
        lifecycle::present(
            &inner.presenter,
            &surface,
            &presentation,
            inner.diagnostics.as_ref(),
        )
        .await;
        drop(completion);
    });
}

/// Shows toasts one at a time, in the order they were submitted.
///
/// Cloning yields another handle to the same queue. Separate
/// [`build`](SchedulerBuilder::build) calls yield independent schedulers.
pub struct ToastScheduler<P: Presenter> {
    inner: Arc<Inner<P>>,
}

impl<P: Presenter> Clone for ToastScheduler<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: Presenter> std::fmt::Debug for ToastScheduler<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastScheduler")
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl<P: Presenter> ToastScheduler<P> {
    /// Creates a scheduler with the default style on the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Runtime`](crate::error::Error::Runtime) when called
    /// outside a Tokio runtime.
    pub fn new(presenter: P) -> Result<Self> {
        Self::builder(presenter).build()
    }

    pub fn builder(presenter: P) -> SchedulerBuilder<P> {
        SchedulerBuilder {
            presenter,
            style: StyleConfig::default(),
            diagnostics: None,
            runtime: None,
        }
    }

    /// Queues a toast.
    ///
    /// Accepts a [`ToastRequest`] or a plain message (long toast, default
    /// surface resolution). Never blocks and never fails; the toast appears
    /// once every earlier request has been shown or dropped.
    pub fn submit(&self, request: impl Into<ToastRequest<P::Surface>>) {
        let request = request.into();
        let id = request.id().value();
        let length_secs = request.toast_length().secs();

        {
            let mut state = self.inner.lock_state();
            state.queue.push_back(request);
            // Logged under the lock so `Queued` precedes this id's `Started`.
            self.inner.log(ToastEvent::Queued {
                id,
                length_secs,
                queued: state.queue.len(),
            });
            self.inner.publish(&state);
        }

        try_advance(&self.inner);
    }

    /// Returns a copy of the current style.
    #[must_use]
    pub fn style(&self) -> StyleConfig {
        self.inner.style_snapshot()
    }

    /// Replaces the style for toasts that have not started yet.
    pub fn set_style(&self, style: StyleConfig) {
        *self
            .inner
            .style
            .write()
            .unwrap_or_else(PoisonError::into_inner) = style;
    }

    /// Edits the style in place for toasts that have not started yet.
    pub fn update_style(&self, update: impl FnOnce(&mut StyleConfig)) {
        let mut style = self
            .inner
            .style
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        update(&mut style);
    }

    #[must_use]
    pub fn status(&self) -> QueueStatus {
        *self.inner.status.borrow()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.status().is_idle()
    }

    /// Resolves once the queue is empty and nothing is presenting.
    pub async fn wait_idle(&self) {
        let mut status = self.inner.status.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = status.wait_for(QueueStatus::is_idle).await;
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.inner.presenter
    }
}

/// Configures a [`ToastScheduler`] before any toast is submitted.
#[must_use]
pub struct SchedulerBuilder<P: Presenter> {
    presenter: P,
    style: StyleConfig,
    diagnostics: Option<DiagnosticsHandle>,
    runtime: Option<Handle>,
}

impl<P: Presenter> SchedulerBuilder<P> {
    pub fn style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Reports lifecycle events to a diagnostics collector.
    pub fn diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        self.diagnostics = Some(handle);
        self
    }

    /// Runs presentations on `runtime` instead of the current one.
    ///
    /// Lets callers outside any runtime context submit toasts.
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::Runtime`](crate::error::Error::Runtime) when no
    /// runtime was given and none is current.
    pub fn build(self) -> Result<ToastScheduler<P>> {
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current()?,
        };
        let (status, _) = watch::channel(QueueStatus::default());

        Ok(ToastScheduler {
            inner: Arc::new(Inner {
                presenter: self.presenter,
                state: Mutex::new(QueueState {
                    queue: VecDeque::new(),
                    running: false,
                }),
                style: RwLock::new(self.style),
                status,
                runtime,
                diagnostics: self.diagnostics,
            }),
        })
    }
}
