// SPDX-License-Identifier: MPL-2.0
//! Presenter that draws toasts as boxes on stderr.
//!
//! A terminal has no real overlay, so the box is printed once when attached
//! and each fade is reported as a status line with the frame it reached.
//! Style lengths are in points and converted to character cells.

use super::Presenter;
use crate::domain::Frame;
use crate::style::StyleConfig;
use std::time::Duration;
use tokio::time::Instant;

/// Approximate width of one terminal cell, in points.
const CELL_WIDTH_POINTS: f32 = 8.0;

/// Width used when `COLUMNS` is unset or invalid.
const DEFAULT_COLUMNS: usize = 80;

/// Widest surface a box is laid out for.
const MAX_COLUMNS: usize = 1000;

/// A terminal "window".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalSurface {
    pub name: String,
    pub columns: usize,
}

impl TerminalSurface {
    /// Describes the terminal the process is attached to.
    ///
    /// Reads the width from `COLUMNS`, falling back to 80.
    #[must_use]
    pub fn current() -> Self {
        let columns = std::env::var("COLUMNS")
            .ok()
            .and_then(|c| c.parse::<usize>().ok())
            .filter(|&c| c > 0)
            .unwrap_or(DEFAULT_COLUMNS);
        Self {
            name: "terminal".to_string(),
            columns,
        }
    }
}

#[derive(Debug)]
pub struct TerminalHandle {
    serial: u64,
    attached_at: Instant,
    frame: Frame,
}

/// Draws toasts on stderr.
#[derive(Debug)]
pub struct TerminalPresenter {
    surface: Option<TerminalSurface>,
    next_serial: std::sync::atomic::AtomicU64,
}

impl TerminalPresenter {
    /// Creates a presenter whose key surface is the current terminal.
    #[must_use]
    pub fn new() -> Self {
        Self::with_surface(Some(TerminalSurface::current()))
    }

    #[must_use]
    pub fn with_surface(surface: Option<TerminalSurface>) -> Self {
        Self {
            surface,
            next_serial: std::sync::atomic::AtomicU64::new(1),
        }
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a style length to cells, capped at `limit`.
fn points_to_cells(points: f32, limit: usize) -> usize {
    if points.is_nan() || points <= 0.0 {
        0
    } else {
        // `as` saturates, so huge and infinite lengths land on `limit`.
        ((points / CELL_WIDTH_POINTS).round() as usize).min(limit)
    }
}

/// Word-wraps `message` to `width` cells, keeping at most `max_lines` lines
/// (0 = unlimited). A truncated last line ends with an ellipsis.
pub(crate) fn wrap_message(message: &str, width: usize, max_lines: u32) -> Vec<String> {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in message.split_whitespace() {
        let mut word = word.to_string();
        // Hard-split words longer than a line.
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            lines.push(head);
        }
        if word.is_empty() {
            continue;
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    let max_lines = max_lines as usize;
    if max_lines > 0 && lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            if last.chars().count() >= width {
                let kept: String = last.chars().take(width.saturating_sub(1)).collect();
                *last = kept;
            }
            last.push('…');
        }
    }
    lines
}

/// Renders the toast box, centered within the surface.
pub(crate) fn render_box(message: &str, style: &StyleConfig, surface: &TerminalSurface) -> Vec<String> {
    let columns = surface.columns.clamp(1, MAX_COLUMNS);
    // Margins may squeeze the text to one cell; padding always leaves room
    // for the borders and one cell of text.
    let margin = points_to_cells(style.horizontal_margin, columns / 2);
    let padding = points_to_cells(style.horizontal_padding, columns.saturating_sub(3) / 2);
    let available = columns
        .saturating_sub(2 * margin + 2 * padding + 2)
        .max(1);

    let lines = wrap_message(message, available, style.number_of_lines);
    let content_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let inner_width = content_width + 2 * padding;
    let indent = " ".repeat(columns.saturating_sub(inner_width + 2) / 2);
    let rounded = style.corner_radius > 0.0;
    let (tl, tr, bl, br) = if rounded {
        ('╭', '╮', '╰', '╯')
    } else {
        ('┌', '┐', '└', '┘')
    };

    let mut rendered = Vec::with_capacity(lines.len() + 2);
    rendered.push(format!("{indent}{tl}{}{tr}", "─".repeat(inner_width)));
    for line in &lines {
        let fill = content_width - line.chars().count();
        let left = fill / 2;
        rendered.push(format!(
            "{indent}│{}{}{line}{}{}│",
            " ".repeat(padding),
            " ".repeat(left),
            " ".repeat(fill - left),
            " ".repeat(padding),
        ));
    }
    rendered.push(format!("{indent}{bl}{}{br}", "─".repeat(inner_width)));
    rendered
}

impl Presenter for TerminalPresenter {
    type Surface = TerminalSurface;
    type Handle = TerminalHandle;

    fn key_surface(&self) -> Option<TerminalSurface> {
        self.surface.clone()
    }

    fn attach(
        &self,
        message: &str,
        style: &StyleConfig,
        surface: &TerminalSurface,
        initial: Frame,
    ) -> TerminalHandle {
        let serial = self
            .next_serial
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        for line in render_box(message, style, surface) {
            eprintln!("{line}");
        }
        TerminalHandle {
            serial,
            attached_at: Instant::now(),
            frame: initial,
        }
    }

    async fn animate(&self, handle: &mut TerminalHandle, target: Frame, duration: Duration) {
        tokio::time::sleep(duration).await;
        handle.frame = target;
        let phase = if target.opacity > 0.0 { "shown" } else { "hidden" };
        eprintln!(
            "  toast {} {phase} at +{:.2}s (opacity {:.1}, offset {:.0})",
            handle.serial,
            handle.attached_at.elapsed().as_secs_f64(),
            target.opacity,
            target.bottom_offset,
        );
    }

    fn detach(&self, handle: TerminalHandle) {
        eprintln!(
            "  toast {} removed after {:.2}s",
            handle.serial,
            handle.attached_at.elapsed().as_secs_f64()
        );
    }
}
