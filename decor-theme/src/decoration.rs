// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shape style of a decorated component.

use std::sync::Arc;

use decor_core::geometry::{Insets, Orientation, Rect};
use decor_core::platform::ComponentId;
use serde::{Deserialize, Serialize};

use crate::cache::ShapeCache;
use crate::error::ThemeResult;
use crate::shape::{border_insets, is_visible, OutlineShape, ShapeParams, ShapeType};
use crate::sides::{resolve_sides, LayoutOverride, SideMask, SideTokens};

/// Rounding, sides and lines of a decoration, as written in a style file.
///
/// ```toml
/// round = 4
/// sides = "1,1,1,0"
/// lines = "0,0,0,1"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationShape {
    /// Corner rounding.
    pub round: Option<i32>,
    /// Side token.
    pub sides: Option<String>,
    /// Line token.
    pub lines: Option<String>,
}

/// Decoration values that depend on the painted state rather than the shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationMetrics {
    /// Outer shade width.
    pub shade_width: i32,
    /// Border stroke width.
    pub border_width: f64,
}

impl DecorationShape {
    /// Parse a shape from TOML.
    pub fn from_toml(content: &str) -> ThemeResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Corner rounding, zero when unset.
    pub fn round(&self) -> i32 {
        self.round.unwrap_or(0)
    }

    /// Overlay the values set in `other`.
    pub fn merge(&mut self, other: &DecorationShape) -> &mut Self {
        if other.round.is_some() {
            self.round = other.round;
        }
        if other.sides.is_some() {
            self.sides = other.sides.clone();
        }
        if other.lines.is_some() {
            self.lines = other.lines.clone();
        }
        self
    }

    /// The tokens set on this shape.
    pub fn tokens(&self) -> SideTokens {
        SideTokens {
            sides: self.sides.clone(),
            lines: self.lines.clone(),
        }
    }

    /// Side mask of `component`, in logical (unmirrored) orientation.
    pub fn side_mask(
        &self,
        component: ComponentId,
        layout: Option<&dyn LayoutOverride>,
    ) -> SideMask {
        resolve_sides(&self.tokens(), layout, component)
    }

    /// Insets the decoration reserves around content.
    pub fn border_insets(&self, mask: &SideMask, metrics: DecorationMetrics) -> Insets {
        border_insets(mask, metrics.shade_width, metrics.border_width)
    }

    /// Whether a layer of this decoration paints anything.
    pub fn is_visible(&self, shape_type: ShapeType, mask: &SideMask) -> bool {
        is_visible(shape_type, mask)
    }

    /// Outline of a layer, mirrored for right-to-left components.
    pub fn outline(
        &self,
        cache: &ShapeCache,
        shape_type: ShapeType,
        bounds: Rect,
        mask: &SideMask,
        orientation: Orientation,
        metrics: DecorationMetrics,
    ) -> Arc<OutlineShape> {
        let params = ShapeParams::new(self.round(), metrics.shade_width, metrics.border_width);
        cache.outline(shape_type, bounds, &mask.oriented(orientation), &params)
    }
}
