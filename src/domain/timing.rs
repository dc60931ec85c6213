// SPDX-License-Identifier: MPL-2.0
//! Presentation timing and placement math.
//!
//! The lifecycle of one toast is fade-in, hold, fade-out. Both fades take the
//! configured fade duration; the hold fills the rest of the toast's length
//! but never drops below [`MIN_HOLD_SECS`].

use super::toast::ToastLength;
use std::time::Duration;

/// Minimum time a toast stays fully visible, in seconds.
pub const MIN_HOLD_SECS: f64 = 1.0;

/// Fraction of the resting offset a toast starts (and ends) at.
pub const SLIDE_START_FACTOR: f32 = 0.9;

/// Computes how long a toast holds between fade-in and fade-out.
///
/// `max(length - 2 * fade, 1s)`.
#[must_use]
pub fn hold_delay(length: ToastLength, fade: Duration) -> Duration {
    let secs = (length.secs() - 2.0 * fade.as_secs_f64()).max(MIN_HOLD_SECS);
    Duration::from_secs_f64(secs)
}

/// Visual state a toast is animated between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f32,
    /// Distance between the bottom edge of the surface and the bottom edge
    /// of the toast.
    pub bottom_offset: f32,
}

impl Frame {
    /// Hidden, slightly below the resting line.
    #[must_use]
    pub fn start(offset: f32) -> Self {
        Self {
            opacity: 0.0,
            bottom_offset: offset * SLIDE_START_FACTOR,
        }
    }

    /// Fully visible on the resting line.
    #[must_use]
    pub fn rest(offset: f32) -> Self {
        Self {
            opacity: 1.0,
            bottom_offset: offset,
        }
    }
}
