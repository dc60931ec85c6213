// SPDX-License-Identifier: MPL-2.0
//! The presentation lifecycle of a single toast.
//!
//! Attach, fade in, hold, fade out, detach. Each phase suspends until the
//! presenter (or the hold timer) reports completion; nothing runs in
//! parallel and nothing can cancel a started presentation.

use crate::diagnostics::{DiagnosticsHandle, ToastEvent};
use crate::domain::{hold_delay, ToastId, ToastLength};
use crate::presenter::Presenter;
use crate::style::StyleConfig;

/// Everything a presentation needs, captured when it starts.
#[derive(Debug, Clone)]
pub(crate) struct Presentation {
    pub id: ToastId,
    pub message: String,
    pub length: ToastLength,
    /// Style snapshot; later style changes do not affect this toast.
    pub style: StyleConfig,
}

/// Runs one presentation to teardown.
pub(crate) async fn present<P: Presenter>(
    presenter: &P,
    surface: &P::Surface,
    presentation: &Presentation,
    diagnostics: Option<&DiagnosticsHandle>,
) {
    let id = presentation.id.value();
    let style = &presentation.style;
    let fade = style.fade();
    let log = |event: ToastEvent| {
        if let Some(handle) = diagnostics {
            handle.log(event);
        }
    };

    let mut handle = presenter.attach(&presentation.message, style, surface, style.start_frame());
    log(ToastEvent::Attached { id });

    presenter.animate(&mut handle, style.rest_frame(), fade).await;

    let hold = hold_delay(presentation.length, fade);
    log(ToastEvent::Shown {
        id,
        hold_ms: hold.as_millis().try_into().unwrap_or(u64::MAX),
    });
    tokio::time::sleep(hold).await;

    presenter.animate(&mut handle, style.start_frame(), fade).await;
    log(ToastEvent::Hidden { id });

    presenter.detach(handle);
}
