// SPDX-License-Identifier: MPL-2.0
//! Toast appearance and fade timing.
//!
//! [`StyleConfig`] is shared by every toast a scheduler shows. It can be
//! changed at any time; each presentation takes a snapshot when it starts,
//! so edits only affect toasts that have not started yet.

use crate::config::defaults;
use crate::domain::Frame;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// An RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);

    /// Creates an opaque color from float components.
    #[must_use]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates an opaque color from 8-bit components.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }
}

/// Font used for the toast message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    /// Font family name. `None` selects the host's system font.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Point size.
    pub size: f32,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: None,
            size: defaults::DEFAULT_FONT_SIZE,
        }
    }
}

/// Appearance and timing shared by all toasts of a scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub background_color: Color,
    pub text_color: Color,
    pub font: Font,
    /// Maximum number of text lines; 0 means unlimited (word wrapped).
    pub number_of_lines: u32,
    pub corner_radius: f32,
    pub vertical_padding: f32,
    pub horizontal_padding: f32,
    /// Duration of each fade, in seconds.
    #[serde(rename = "fade_duration_secs")]
    pub fade_duration: f64,
    /// Resting distance from the bottom of the surface.
    pub offset: f32,
    /// Minimum gap between the toast and the left/right surface edges.
    pub horizontal_margin: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: Color::from_rgb8(80, 80, 80),
            text_color: Color::WHITE,
            font: Font::default(),
            number_of_lines: defaults::DEFAULT_NUMBER_OF_LINES,
            corner_radius: defaults::DEFAULT_CORNER_RADIUS,
            vertical_padding: defaults::DEFAULT_VERTICAL_PADDING,
            horizontal_padding: defaults::DEFAULT_HORIZONTAL_PADDING,
            fade_duration: defaults::DEFAULT_FADE_DURATION_SECS,
            offset: defaults::DEFAULT_OFFSET,
            horizontal_margin: defaults::DEFAULT_HORIZONTAL_MARGIN,
        }
    }
}

impl StyleConfig {
    /// Returns the fade duration, clamped to `0..=MAX_FADE_DURATION_SECS`.
    ///
    /// Negative and NaN values map to zero.
    #[must_use]
    pub fn fade(&self) -> Duration {
        let secs = if self.fade_duration.is_nan() {
            0.0
        } else {
            self.fade_duration
                .clamp(0.0, defaults::MAX_FADE_DURATION_SECS)
        };
        Duration::from_secs_f64(secs)
    }

    /// Frame a toast is attached at and faded out to.
    #[must_use]
    pub fn start_frame(&self) -> Frame {
        Frame::start(self.offset)
    }

    /// Frame a toast rests at while held.
    #[must_use]
    pub fn rest_frame(&self) -> Frame {
        Frame::rest(self.offset)
    }
}
