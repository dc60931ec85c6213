// SPDX-License-Identifier: MPL-2.0
//! Surface resolution for dequeued requests.

use crate::presenter::Presenter;

/// Picks the surface a toast is shown on.
///
/// Order: the request's explicit target, the presenter's key surface, the
/// presenter's root surface. `None` means the request is dropped.
pub fn resolve_surface<P: Presenter>(
    presenter: &P,
    target: Option<P::Surface>,
) -> Option<P::Surface> {
    target
        .or_else(|| presenter.key_surface())
        .or_else(|| presenter.root_surface())
}
