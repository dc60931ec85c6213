// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Layout**: Padding, margins, corner radius and resting offset
//! - **Text**: Font size and line limit
//! - **Timing**: Fade duration bounds
//! - **Diagnostics**: Event buffer capacity

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Corner radius of the toast background.
pub const DEFAULT_CORNER_RADIUS: f32 = 17.0;

/// Space between the message and the top/bottom edges of the toast.
pub const DEFAULT_VERTICAL_PADDING: f32 = 8.0;

/// Space between the message and the left/right edges of the toast.
pub const DEFAULT_HORIZONTAL_PADDING: f32 = 18.0;

/// Resting distance between the toast and the bottom of its surface.
pub const DEFAULT_OFFSET: f32 = 70.0;

/// Minimum gap between the toast and the sides of its surface.
pub const DEFAULT_HORIZONTAL_MARGIN: f32 = 20.0;

// ==========================================================================
// Text Defaults
// ==========================================================================

/// Message font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Maximum number of message lines (0 = unlimited).
pub const DEFAULT_NUMBER_OF_LINES: u32 = 0;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Duration of the fade-in and of the fade-out (in seconds).
pub const DEFAULT_FADE_DURATION_SECS: f64 = 0.5;

/// Upper bound applied to a configured fade duration (in seconds).
pub const MAX_FADE_DURATION_SECS: f64 = 10.0;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of lifecycle events kept by the diagnostics collector.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 16;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;
