// SPDX-License-Identifier: MPL-2.0
//! Toast request value types.
//!
//! A [`ToastRequest`] is what callers hand to the scheduler: a message, an
//! intended lifetime ([`ToastLength`]) and optionally the surface to show it
//! on. Requests are immutable once built and are consumed by the scheduler
//! when their presentation completes.

use std::fmt;
use std::time::Duration;

/// Unique identifier for a toast request.
///
/// Identifiers are process-wide and increase monotonically, so they also
/// reflect submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique toast ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Total intended visible lifetime of a toast (fade-in + hold + fade-out).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastLength {
    /// 2.0 seconds.
    Short,
    /// 3.5 seconds.
    #[default]
    Long,
}

impl ToastLength {
    /// Returns the lifetime in seconds.
    #[must_use]
    pub fn secs(self) -> f64 {
        match self {
            ToastLength::Short => 2.0,
            ToastLength::Long => 3.5,
        }
    }

    /// Returns the lifetime as a [`Duration`].
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs_f64(self.secs())
    }
}

impl fmt::Display for ToastLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToastLength::Short => write!(f, "short"),
            ToastLength::Long => write!(f, "long"),
        }
    }
}

/// A request to show one toast.
///
/// `S` is the presenter's surface type. When `target` is `None` the
/// scheduler resolves a surface at presentation time.
#[derive(Debug, Clone)]
pub struct ToastRequest<S> {
    id: ToastId,
    target: Option<S>,
    message: String,
    length: ToastLength,
}

impl<S> ToastRequest<S> {
    /// Creates a long toast with default surface resolution.
    ///
    /// The message is not validated; an empty string is shown as-is.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: ToastId::new(),
            target: None,
            message: message.into(),
            length: ToastLength::default(),
        }
    }

    /// Sets the toast lifetime.
    #[must_use]
    pub fn length(mut self, length: ToastLength) -> Self {
        self.length = length;
        self
    }

    /// Shorthand for `length(ToastLength::Short)`.
    #[must_use]
    pub fn short(self) -> Self {
        self.length(ToastLength::Short)
    }

    /// Shorthand for `length(ToastLength::Long)`.
    #[must_use]
    pub fn long(self) -> Self {
        self.length(ToastLength::Long)
    }

    /// Targets an explicit surface instead of the host's active one.
    #[must_use]
    pub fn on(mut self, surface: S) -> Self {
        self.target = Some(surface);
        self
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn toast_length(&self) -> ToastLength {
        self.length
    }

    #[must_use]
    pub fn target(&self) -> Option<&S> {
        self.target.as_ref()
    }

    /// Splits the request into its parts, consuming it.
    pub(crate) fn into_parts(self) -> (ToastId, Option<S>, String, ToastLength) {
        (self.id, self.target, self.message, self.length)
    }
}

impl<S> From<&str> for ToastRequest<S> {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl<S> From<String> for ToastRequest<S> {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl<S> From<(&str, ToastLength)> for ToastRequest<S> {
    fn from((message, length): (&str, ToastLength)) -> Self {
        Self::new(message).length(length)
    }
}
