// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Decorated component shapes and animated radial popup menus.
//!
//! - [core]: windowing and timer seams, headless backend, animation engine
//!   and configuration
//! - [theme]: side masks, decoration outlines and their cache
//! - [widgets]: the [DynamicMenu](widgets::dynamic_menu::DynamicMenu)

pub use nalgebra as math;
pub use vello::peniko as color;

pub use decor_core as core;
pub use decor_theme as theme;
pub use decor_widgets as widgets;

/// A "prelude" for users of decor.
///
/// Importing this module brings into scope the most common types
/// needed to show a menu or compute a decoration outline.
///
/// ```rust
/// use decor::prelude::*;
///
/// let mask = SideMask::parse(Some("1,1,1,1"), None);
/// let outline = compute_outline(
///     ShapeType::Border,
///     Rect::new(0.0, 0.0, 100.0, 40.0),
///     &mask,
///     &ShapeParams::new(4, 2, 1.0),
/// );
/// assert!(outline.closed);
/// ```
pub mod prelude {
    pub use crate::core::animation::{AnimationController, Direction};
    pub use crate::core::config::{DecorConfig, MenuAnimationType};
    pub use crate::core::geometry::{Insets, Orientation, Point, Rect, Size};
    pub use crate::core::platform::{ComponentId, HeadlessPlatform, OverlaySurface, Windowing};
    pub use crate::core::timer::{ManualTimer, Timer};
    #[cfg(feature = "tokio-timer")]
    pub use crate::core::timer::TokioTimer;
    pub use crate::core::{CoreError, CoreResult};

    pub use crate::theme::cache::ShapeCache;
    pub use crate::theme::decoration::{DecorationMetrics, DecorationShape};
    pub use crate::theme::shape::{compute_outline, OutlineShape, ShapeParams, ShapeType};
    pub use crate::theme::sides::{LayoutOverride, SideMask, SideTokens};
    pub use crate::theme::{ThemeError, ThemeResult};

    pub use crate::widgets::dynamic_menu::{
        DynamicMenu, DynamicMenuItem, DynamicMenuType, MenuIcon, RadialLayout,
    };

    // Color
    pub use crate::color::Color;
}
