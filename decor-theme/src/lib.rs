// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! # Decor Decorations
//!
//! Geometry of decorated component borders.
//!
//! - **[SideMask](sides::SideMask)**: which sides of a component are painted
//!   in full or as thin lines, parsed from compact side tokens
//! - **[compute_outline](shape::compute_outline)**: closed or open outlines
//!   and content insets for each decoration layer
//! - **[ShapeCache](cache::ShapeCache)**: memoized outlines keyed by their inputs
//! - **[DecorationShape](decoration::DecorationShape)**: the shape part of a
//!   style, loadable from TOML
//!
//! ```rust
//! use decor_theme::shape::{compute_outline, ShapeParams, ShapeType};
//! use decor_theme::sides::SideMask;
//! use decor_core::geometry::Rect;
//!
//! // Top side suppressed and replaced by a thin line.
//! let mask = SideMask::parse(Some("0,1,1,1"), Some("1,0,0,0"));
//! let outline = compute_outline(
//!     ShapeType::Border,
//!     Rect::new(0.0, 0.0, 120.0, 30.0),
//!     &mask,
//!     &ShapeParams::new(4, 2, 1.0),
//! );
//! assert_eq!(outline.insets.top, 1.0);
//! ```

/// Contains the outline cache.
pub mod cache;

/// Contains the decoration shape style.
pub mod decoration;

/// Contains the theme error types.
pub mod error;

/// Contains outline and inset computation.
pub mod shape;

/// Contains side and line descriptors.
pub mod sides;

pub use error::{ThemeError, ThemeResult};
