// SPDX-License-Identifier: MPL-2.0
//! `toast_queue` shows short-lived notifications ("toasts") one at a time.
//!
//! Any number of callers may submit toasts at once; the [`ToastScheduler`]
//! queues them and drives each through fade-in, hold and fade-out on a
//! [`Presenter`] before starting the next one. Rendering is left to the
//! presenter, so the same scheduler works over any UI technology.
//!
//! [`ToastScheduler`]: scheduler::ToastScheduler
//! [`Presenter`]: presenter::Presenter

#![doc(html_root_url = "https://docs.rs/toast_queue/0.3.0")]

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod paths;
pub mod presenter;
pub mod scheduler;
pub mod style;

#[cfg(test)]
mod test_utils;
