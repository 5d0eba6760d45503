// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core library for decor => See `decor` crate.
//!
//! Contains the collaborator seams (windowing, timers), the shared animation
//! engine and the configuration used by the theme and widget crates.

pub use vello as vg;

/// Contains the [DecorConfig](config::DecorConfig) struct.
pub mod config;

/// Contains the error types of the core crate.
pub mod error;

/// Contains small geometry helpers shared by shapes and widgets.
pub mod geometry;

/// Contains the windowing collaborator abstraction and a headless backend.
pub mod platform;

/// Contains the timer collaborator abstraction.
pub mod timer;

/// Contains the progress animation engine used for show/hide transitions.
pub mod animation;

pub use error::{CoreError, CoreResult};
