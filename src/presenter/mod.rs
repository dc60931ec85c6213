// SPDX-License-Identifier: MPL-2.0
//! The rendering capability the scheduler drives.
//!
//! A [`Presenter`] knows how to put a styled toast on a surface, animate it
//! between two [`Frame`]s and take it down again. The scheduler never looks
//! inside a surface or a handle; it only sequences the calls.
//!
//! Two implementations ship with the crate:
//!
//! - [`RecordingPresenter`] - headless, records every call (hosts without a
//!   display, tests)
//! - [`TerminalPresenter`] - draws toasts on stderr (the demo binary)

mod recording;
mod terminal;

pub use recording::{
    Recorded, RecordedCall, RecordingHandle, RecordingPresenter, DEFAULT_KEY_SURFACE,
};
pub use terminal::{TerminalHandle, TerminalPresenter, TerminalSurface};

use crate::domain::Frame;
use crate::style::StyleConfig;
use std::future::Future;
use std::time::Duration;

/// UI-technology-specific collaborator that renders toasts.
///
/// Implementations must report animation completion by resolving the future
/// returned from [`animate`](Presenter::animate); the scheduler suspends on it
/// and does nothing else with the toast until it resolves.
pub trait Presenter: Send + Sync + 'static {
    /// A display context a toast can be attached to.
    type Surface: Clone + Send + Sync + 'static;
    /// An attached visual element.
    type Handle: Send + 'static;

    /// The host's current key (active) surface, if any.
    fn key_surface(&self) -> Option<Self::Surface>;

    /// The host application's designated root surface, if any.
    ///
    /// Consulted when there is neither an explicit target nor a key surface.
    fn root_surface(&self) -> Option<Self::Surface> {
        None
    }

    /// Creates the visual element, sized to `message` with the style's
    /// padding and margins, positioned bottom-center on `surface` at
    /// `initial`.
    fn attach(
        &self,
        message: &str,
        style: &StyleConfig,
        surface: &Self::Surface,
        initial: Frame,
    ) -> Self::Handle;

    /// Animates opacity and offset to `target` over `duration`.
    ///
    /// The returned future resolves when the animation has completed.
    fn animate(
        &self,
        handle: &mut Self::Handle,
        target: Frame,
        duration: Duration,
    ) -> impl Future<Output = ()> + Send;

    /// Removes the element from its surface.
    fn detach(&self, handle: Self::Handle);
}
