// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Widget library for decor => See `decor` crate.
//!
//! Contains the animated radial [DynamicMenu](dynamic_menu::DynamicMenu).

/// Contains the [dynamic_menu::DynamicMenu] widget and its items and layout.
pub mod dynamic_menu;
