// SPDX-License-Identifier: MPL-2.0
//! Domain layer - toast value types with ZERO external dependencies.
//!
//! This module contains pure domain types and timing rules. It has no
//! dependencies on external crates (except `std`) so the scheduling math
//! can be tested in isolation.
//!
//! # Modules
//!
//! - [`toast`]: Request types ([`ToastId`](toast::ToastId),
//!   [`ToastLength`](toast::ToastLength), [`ToastRequest`](toast::ToastRequest))
//! - [`timing`]: Hold delay computation and animation [`Frame`](timing::Frame)s

pub mod timing;
pub mod toast;

pub use timing::{hold_delay, Frame, MIN_HOLD_SECS};
pub use toast::{ToastId, ToastLength, ToastRequest};
